//! Error types shared across the crate.

use thiserror::Error;

use crate::range::GeohashRange;

/// Errors produced by coordinate validation, geohash handling, and range
/// operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoRangeError {
    /// Latitude outside `[-90, 90]` or longitude outside `[-180, 180]`.
    #[error("invalid coordinates: [{lat}, {lon}]")]
    InvalidCoordinates { lat: f64, lon: f64 },

    /// Geohash character precision outside `1..=22`.
    #[error("invalid geohash precision {0}, must be between 1 and 22")]
    InvalidPrecision(usize),

    /// Character outside the geohash base-32 alphabet.
    #[error("invalid base32 character {0:?}")]
    InvalidChar(char),

    /// Numeric value with no base-32 character (must be below 32).
    #[error("invalid base32 value {0}")]
    InvalidValue(u8),

    /// String is empty or contains characters outside the alphabet.
    #[error("invalid geohash string {0:?}")]
    InvalidGeohash(String),

    /// The two ranges neither overlap nor contain one another.
    #[error("range {first} cannot be joined with {second}")]
    CannotJoin {
        first: GeohashRange,
        second: GeohashRange,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GeoRangeError>;
