//! Reading and writing the geo fields of indexed documents.
//!
//! Documents in a geo-queried collection carry two fields: `g`, the
//! precision-10 geohash the collection is ordered by, and `l`, the point
//! itself. The point appears in one of two historically observed shapes, a
//! `[lat, lon]` sequence or a `{latitude, longitude}` object. Readers
//! tolerate both; writers emit only the object shape. A missing or
//! unrecognized field means "no location", never an error.

use serde_json::{Map, Value};

use crate::geohash::Geohash;
use crate::geom;
use crate::location::Location;

/// Document field holding the geohash the index orders by.
pub const GEOHASH_FIELD: &str = "g";

/// Document field holding the document's point.
pub const LOCATION_FIELD: &str = "l";

/// Extracts the document's location from its `l` field.
///
/// Returns `None` when the field is absent, ill-typed, of an unknown
/// shape, or holds out-of-domain coordinates.
///
/// # Examples
///
/// ```rust
/// use georange::document::location_value;
/// use serde_json::json;
///
/// let native = json!({"l": {"latitude": 37.7749, "longitude": -122.4194}});
/// let sequence = json!({"l": [37.7749, -122.4194]});
/// assert_eq!(location_value(&native), location_value(&sequence));
///
/// assert_eq!(location_value(&json!({"l": "garbage"})), None);
/// ```
pub fn location_value(document: &Value) -> Option<Location> {
    let value = document.get(LOCATION_FIELD)?;
    serde_json::from_value(value.clone()).ok()
}

/// Extracts the document's geohash from its `g` field.
///
/// Returns `None` when the field is absent, not a string, or not a valid
/// geohash.
pub fn geohash_value(document: &Value) -> Option<Geohash> {
    let raw = document.get(GEOHASH_FIELD)?.as_str()?;
    Geohash::parse(raw).ok()
}

/// Builds the `g` and `l` fields to store for a document at `location`.
///
/// The geohash is encoded at the stored-index precision of ten characters
/// and the point is written in the native object shape.
pub fn location_fields(location: &Location) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert(
        GEOHASH_FIELD.to_owned(),
        Value::String(Geohash::from(location).into()),
    );
    fields.insert(
        LOCATION_FIELD.to_owned(),
        serde_json::to_value(location).unwrap_or(Value::Null),
    );
    fields
}

/// Returns `true` when the document has a readable location within
/// `radius_metres` of `center`.
///
/// Documents without a readable location are never within radius. This is
/// the candidate filter applied after scanning the planned ranges.
pub fn is_within_radius(document: &Value, center: &Location, radius_metres: f64) -> bool {
    match location_value(document) {
        Some(location) => geom::haversine_distance(center, &location) <= radius_metres,
        None => false,
    }
}
