//! Validated geographic locations.
//!
//! [`Location`] is the coordinate pair everything else in this crate works
//! on. It can only be constructed with a latitude in `[-90, 90]` and a
//! longitude in `[-180, 180]`, so downstream code never re-validates.
//!
//! On the wire a location appears in one of two historically observed
//! shapes: a two-element `[lat, lon]` sequence, or a point object with
//! `latitude` / `longitude` fields. Deserialization accepts both;
//! serialization emits only the point object.

use serde::{Deserialize, Serialize};

use crate::error::{GeoRangeError, Result};

/// A validated `(latitude, longitude)` pair in degrees.
///
/// Equality is exact bit equality of the two doubles, so `-0.0` and `0.0`
/// longitudes compare unequal.
///
/// # Examples
///
/// ```rust
/// use georange::Location;
///
/// let sf = Location::new(37.7749, -122.4194)?;
/// assert_eq!(sf.lat(), 37.7749);
///
/// assert!(Location::new(90.01, 0.0).is_err());
/// # Ok::<(), georange::GeoRangeError>(())
/// ```
///
/// Both wire shapes deserialize to the same value:
///
/// ```rust
/// use georange::Location;
///
/// let from_pair: Location = serde_json::from_str("[37.7749, -122.4194]")?;
/// let from_point: Location =
///     serde_json::from_str(r#"{"latitude":37.7749,"longitude":-122.4194}"#)?;
/// assert_eq!(from_pair, from_point);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(into = "PointFields", try_from = "LocationRepr")]
pub struct Location {
    lat: f64,
    lon: f64,
}

impl Location {
    /// Creates a location after validating both coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`GeoRangeError::InvalidCoordinates`] when the latitude is
    /// outside `[-90, 90]` or the longitude outside `[-180, 180]` (NaN fails
    /// both).
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if Self::coordinates_valid(lat, lon) {
            Ok(Self { lat, lon })
        } else {
            Err(GeoRangeError::InvalidCoordinates { lat, lon })
        }
    }

    /// Returns `true` when the pair is within the coordinate domains.
    pub fn coordinates_valid(lat: f64, lon: f64) -> bool {
        (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
    }

    /// Latitude in degrees.
    #[inline]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    #[inline]
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.lat.to_bits() == other.lat.to_bits() && self.lon.to_bits() == other.lon.to_bits()
    }
}

// NaN never passes validation, so bitwise equality is reflexive here.
impl Eq for Location {}

impl From<Location> for geo::Point<f64> {
    fn from(location: Location) -> Self {
        geo::Point::new(location.lon, location.lat)
    }
}

impl TryFrom<geo::Point<f64>> for Location {
    type Error = GeoRangeError;

    fn try_from(point: geo::Point<f64>) -> Result<Self> {
        Self::new(point.y(), point.x())
    }
}

/// The native point shape written to stores.
#[derive(Serialize)]
struct PointFields {
    latitude: f64,
    longitude: f64,
}

impl From<Location> for PointFields {
    fn from(location: Location) -> Self {
        Self {
            latitude: location.lat,
            longitude: location.lon,
        }
    }
}

/// The two accepted wire shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum LocationRepr {
    Sequence([f64; 2]),
    Point { latitude: f64, longitude: f64 },
}

impl TryFrom<LocationRepr> for Location {
    type Error = GeoRangeError;

    fn try_from(repr: LocationRepr) -> Result<Self> {
        match repr {
            LocationRepr::Sequence([lat, lon]) => Self::new(lat, lon),
            LocationRepr::Point {
                latitude,
                longitude,
            } => Self::new(latitude, longitude),
        }
    }
}
