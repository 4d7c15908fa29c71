//! Geohash range planning for radius queries over lexicographically ordered
//! string indexes.
//!
//! ```rust
//! use georange::document::is_within_radius;
//! use georange::{Location, cap_radius_km, plan_ranges};
//! use serde_json::json;
//!
//! let center = Location::new(37.7749, -122.4194)?;
//! let radius_metres = cap_radius_km(0.5) * 1000.0;
//!
//! // One half-open [start, end) scan per range against the ordered "g" field.
//! let ranges = plan_ranges(&center, radius_metres);
//! assert!(!ranges.is_empty() && ranges.len() <= 9);
//!
//! // Scanned documents are only candidates; re-check the true distance.
//! let candidate = json!({"l": {"latitude": 37.7733, "longitude": -122.4181}});
//! assert!(is_within_radius(&candidate, &center, radius_metres));
//! # Ok::<(), georange::GeoRangeError>(())
//! ```

pub mod base32;
pub mod document;
pub mod error;
pub mod geohash;
pub mod geom;
pub mod location;
pub mod planner;
pub mod range;

pub use error::{GeoRangeError, Result};

pub use geohash::{DEFAULT_PRECISION, Geohash, MAX_PRECISION, MAX_PRECISION_BITS};

pub use location::Location;

pub use planner::plan_ranges;

pub use range::GeohashRange;

pub use geom::{MAX_SUPPORTED_RADIUS_KM, cap_radius_km, haversine_distance};

pub use geo::Point;

pub use rustc_hash::FxHashSet;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{GeoRangeError, Geohash, GeohashRange, Location, Result, plan_ranges};

    pub use crate::{cap_radius_km, haversine_distance};

    pub use crate::document::{is_within_radius, location_fields, location_value};

    pub use geo::Point;
}
