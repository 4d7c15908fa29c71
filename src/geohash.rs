//! Geohash encoding over the base-32 alphabet.
//!
//! A geohash is built by recursively bisecting the longitude and latitude
//! domains and interleaving the resulting bits, longitude first. Five bits
//! form one character, so every extra character multiplies the resolution of
//! one axis by 8 and the other by 4.
//!
//! Encoding resolves boundary ties downward: a bit is set only when the
//! coordinate is strictly greater than the interval midpoint. Stored indexes
//! depend on that exact rule, so it must never change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::base32;
use crate::error::{GeoRangeError, Result};
use crate::location::Location;

/// Character precision used when none is requested explicitly.
pub const DEFAULT_PRECISION: usize = 10;

/// Longest supported geohash, in characters.
pub const MAX_PRECISION: usize = 22;

/// Number of interleaved bits in a maximum-precision geohash.
pub const MAX_PRECISION_BITS: usize = MAX_PRECISION * base32::BITS_PER_CHAR;

/// A validated geohash string.
///
/// The inner string is non-empty, at most [`MAX_PRECISION`] characters long,
/// and drawn entirely from the base-32 alphabet. Hashes of equal length sort
/// lexicographically in the same order as the cells they name, which is what
/// makes range scans over a string index work.
///
/// # Examples
///
/// ```rust
/// use georange::Geohash;
///
/// let hash = Geohash::encode(37.7749, -122.4194, 5)?;
/// assert_eq!(hash.as_str(), "9q8yy");
///
/// let parsed: Geohash = "9q8yy".parse()?;
/// assert_eq!(parsed, hash);
/// # Ok::<(), georange::GeoRangeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Geohash(String);

impl Geohash {
    /// Encodes a coordinate pair at the given character precision.
    ///
    /// # Arguments
    ///
    /// * `lat` - Latitude in degrees, `[-90, 90]`
    /// * `lon` - Longitude in degrees, `[-180, 180]`
    /// * `precision` - Output length in characters, `1..=22`
    ///
    /// # Errors
    ///
    /// Returns [`GeoRangeError::InvalidPrecision`] for a precision outside
    /// `1..=22` and [`GeoRangeError::InvalidCoordinates`] for a coordinate
    /// outside its domain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use georange::Geohash;
    ///
    /// let hash = Geohash::encode(0.0, 0.0, 10)?;
    /// assert_eq!(hash.as_str(), "7zzzzzzzzz");
    /// # Ok::<(), georange::GeoRangeError>(())
    /// ```
    pub fn encode(lat: f64, lon: f64, precision: usize) -> Result<Self> {
        check_precision(precision)?;
        if !Location::coordinates_valid(lat, lon) {
            return Err(GeoRangeError::InvalidCoordinates { lat, lon });
        }
        Ok(interleave(lat, lon, precision))
    }

    /// Encodes an already validated location at the given precision.
    ///
    /// # Errors
    ///
    /// Returns [`GeoRangeError::InvalidPrecision`] for a precision outside
    /// `1..=22`.
    pub fn from_location(location: &Location, precision: usize) -> Result<Self> {
        check_precision(precision)?;
        Ok(interleave(location.lat(), location.lon(), precision))
    }

    /// Parses and validates a geohash string.
    ///
    /// # Errors
    ///
    /// Returns [`GeoRangeError::InvalidGeohash`] when the string is empty,
    /// longer than [`MAX_PRECISION`] characters, or contains characters
    /// outside the base-32 alphabet.
    pub fn parse(s: &str) -> Result<Self> {
        if s.len() > MAX_PRECISION || !base32::is_valid(s) {
            return Err(GeoRangeError::InvalidGeohash(s.to_owned()));
        }
        Ok(Self(s.to_owned()))
    }

    /// The hash as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a validated hash; present for API completeness.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Interleaved bisection over pre-validated inputs.
///
/// Callers guarantee `precision` is in `1..=22` and the coordinates are in
/// domain. Bit `k = i * 5 + j` bisects longitude when `k` is even and
/// latitude when `k` is odd, and is set only on a strict `>` comparison
/// against the midpoint.
pub(crate) fn interleave(lat: f64, lon: f64, precision: usize) -> Geohash {
    let mut lat_range = (-90.0_f64, 90.0_f64);
    let mut lon_range = (-180.0_f64, 180.0_f64);
    let mut hash = String::with_capacity(precision);

    for i in 0..precision {
        let mut value = 0u8;
        for (j, &mask) in base32::BIT_MASKS.iter().enumerate() {
            let even_bit = (i * base32::BITS_PER_CHAR + j) % 2 == 0;
            let (range, coordinate) = if even_bit {
                (&mut lon_range, lon)
            } else {
                (&mut lat_range, lat)
            };
            let mid = (range.0 + range.1) / 2.0;
            if coordinate > mid {
                value |= mask;
                range.0 = mid;
            } else {
                range.1 = mid;
            }
        }
        hash.push(base32::char_for(value));
    }

    Geohash(hash)
}

fn check_precision(precision: usize) -> Result<()> {
    if (1..=MAX_PRECISION).contains(&precision) {
        Ok(())
    } else {
        Err(GeoRangeError::InvalidPrecision(precision))
    }
}

impl From<&Location> for Geohash {
    /// Encodes at [`DEFAULT_PRECISION`].
    fn from(location: &Location) -> Self {
        interleave(location.lat(), location.lon(), DEFAULT_PRECISION)
    }
}

impl FromStr for Geohash {
    type Err = GeoRangeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Geohash {
    type Error = GeoRangeError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Geohash> for String {
    fn from(hash: Geohash) -> Self {
        hash.0
    }
}

impl fmt::Display for Geohash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
