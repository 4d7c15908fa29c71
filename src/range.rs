//! Half-open lexicographic scan ranges over geohash strings.
//!
//! A [`GeohashRange`] is a `[start, end)` interval in plain ASCII order,
//! meant to drive a range scan over an index of geohash strings. The end
//! bound may carry the sentinel `'~'` (0x7E), which sorts after every
//! base-32 character and therefore closes off an entire subtree.

use std::fmt;

use crate::base32;
use crate::error::{GeoRangeError, Result};
use crate::geohash::{Geohash, MAX_PRECISION_BITS};

/// A half-open string interval `[start, end)` over geohash space.
///
/// Ranges are produced by [`GeohashRange::for_hash`] and by the query
/// planner, and compare equal when both bounds match exactly.
///
/// # Examples
///
/// ```rust
/// use georange::{Geohash, GeohashRange};
///
/// let hash = Geohash::parse("9q8yy")?;
/// let range = GeohashRange::for_hash(&hash, 23);
/// assert_eq!(range.start(), "9q8yw");
/// assert_eq!(range.end(), "9q8y~");
/// assert!(range.contains(&hash));
/// # Ok::<(), georange::GeoRangeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeohashRange {
    start: String,
    end: String,
}

impl GeohashRange {
    pub(crate) fn new(start: String, end: String) -> Self {
        debug_assert!(start < end, "range start {start:?} must precede end {end:?}");
        Self { start, end }
    }

    /// Derives the scan range covering every hash that shares the first
    /// `bits` interleaved bits with `hash`.
    ///
    /// When the hash is shorter than the character precision implied by
    /// `bits`, the range spans the hash's entire subtree instead.
    ///
    /// # Arguments
    ///
    /// * `hash` - The query hash the range is anchored on
    /// * `bits` - Significant bit count, `1..=110`
    ///
    /// # Panics
    ///
    /// Panics when `bits` is outside `1..=110`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use georange::{Geohash, GeohashRange};
    ///
    /// let range = GeohashRange::for_hash(&Geohash::parse("9")?, 2);
    /// assert_eq!(range.start(), "8");
    /// assert_eq!(range.end(), "h");
    /// # Ok::<(), georange::GeoRangeError>(())
    /// ```
    pub fn for_hash(hash: &Geohash, bits: usize) -> Self {
        assert!(
            (1..=MAX_PRECISION_BITS).contains(&bits),
            "bit precision must be between 1 and {MAX_PRECISION_BITS}"
        );

        let precision = bits.div_ceil(base32::BITS_PER_CHAR);
        if hash.len() < precision {
            return Self::new(hash.as_str().to_owned(), format!("{hash}~"));
        }

        let truncated = &hash.as_str()[..precision];
        let base = &truncated[..precision - 1];
        let last_value = base32::value_for(truncated.as_bytes()[precision - 1]);

        let significant_bits = bits - (precision - 1) * base32::BITS_PER_CHAR;
        let unused_bits = base32::BITS_PER_CHAR - significant_bits;
        let start_value = (last_value >> unused_bits) << unused_bits;
        let end_value = start_value + (1u8 << unused_bits);

        let start = format!("{base}{}", base32::char_for(start_value));
        let end = if end_value > 31 {
            format!("{base}~")
        } else {
            format!("{base}{}", base32::char_for(end_value))
        };
        Self::new(start, end)
    }

    /// Inclusive start bound.
    #[inline]
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Exclusive end bound.
    #[inline]
    pub fn end(&self) -> &str {
        &self.end
    }

    /// Returns `true` when `hash` falls inside `[start, end)` in ASCII
    /// order.
    pub fn contains(&self, hash: &Geohash) -> bool {
        self.start.as_str() <= hash.as_str() && hash.as_str() < self.end.as_str()
    }

    // `other` overlaps `self` from below: it starts strictly before `self`
    // and ends inside it, at or past `self`'s start.
    fn is_prefix(&self, other: &Self) -> bool {
        other.end >= self.start && other.start < self.start && other.end < self.end
    }

    // `other` entirely contains `self`.
    fn is_super(&self, other: &Self) -> bool {
        other.start <= self.start && other.end >= self.end
    }

    /// Returns `true` when [`GeohashRange::join`] would succeed, in either
    /// argument order.
    pub fn can_join(&self, other: &Self) -> bool {
        self.is_prefix(other)
            || other.is_prefix(self)
            || self.is_super(other)
            || other.is_super(self)
    }

    /// Merges two overlapping, touching, or nested ranges into one that
    /// covers exactly their union.
    ///
    /// The result is the same whichever operand is the receiver.
    ///
    /// # Errors
    ///
    /// Returns [`GeoRangeError::CannotJoin`] when the ranges are disjoint
    /// and not touching, carrying both operands.
    pub fn join(&self, other: &Self) -> Result<Self> {
        if other.is_prefix(self) {
            Ok(Self::new(self.start.clone(), other.end.clone()))
        } else if self.is_prefix(other) {
            Ok(Self::new(other.start.clone(), self.end.clone()))
        } else if self.is_super(other) {
            Ok(other.clone())
        } else if other.is_super(self) {
            Ok(self.clone())
        } else {
            Err(GeoRangeError::CannotJoin {
                first: self.clone(),
                second: other.clone(),
            })
        }
    }
}

impl fmt::Display for GeohashRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: &str, end: &str) -> GeohashRange {
        GeohashRange::new(start.to_owned(), end.to_owned())
    }

    fn for_hash(hash: &str, bits: usize) -> GeohashRange {
        GeohashRange::for_hash(&Geohash::parse(hash).unwrap(), bits)
    }

    #[test]
    fn test_derives_reference_ranges() {
        let cases = [
            ("7", 1, "0", "h"),
            ("s", 1, "h", "~"),
            ("9", 2, "8", "h"),
            ("9q8yy", 25, "9q8yy", "9q8yz"),
            ("9q8yy", 23, "9q8yw", "9q8y~"),
            ("9q8yyzzzzz", 7, "9h", "9s"),
            ("7zzzzzzzzz", 50, "7zzzzzzzzz", "7zzzzzzzz~"),
        ];
        for (hash, bits, start, end) in cases {
            let range = for_hash(hash, bits);
            assert_eq!(range.start(), start, "rangeFor({hash}, {bits})");
            assert_eq!(range.end(), end, "rangeFor({hash}, {bits})");
        }
    }

    #[test]
    fn test_short_hash_covers_whole_subtree() {
        assert_eq!(for_hash("9q", 11), range("9q", "9q~"));
        assert_eq!(for_hash("9", 50), range("9", "9~"));
    }

    #[test]
    fn test_range_anchored_on_hash_contains_it() {
        for bits in [1, 5, 17, 23, 25, 50] {
            let hash = Geohash::parse("9q8yyzzzzz").unwrap();
            let range = GeohashRange::for_hash(&hash, bits);
            assert!(range.contains(&hash), "{range} must contain {hash}");
        }
    }

    #[test]
    #[should_panic(expected = "bit precision must be between 1 and 110")]
    fn test_zero_bits_panics() {
        for_hash("9q8yy", 0);
    }

    #[test]
    #[should_panic]
    fn test_oversized_bits_panics() {
        for_hash("9q8yy", 111);
    }

    #[test]
    fn test_contains_is_half_open() {
        let range = for_hash("9q8yy", 25);
        assert_eq!(range, self::range("9q8yy", "9q8yz"));

        // Start is inclusive, end is exclusive.
        assert!(range.contains(&Geohash::parse("9q8yy").unwrap()));
        assert!(range.contains(&Geohash::parse("9q8yyzzzzz").unwrap()));
        assert!(!range.contains(&Geohash::parse("9q8yz").unwrap()));
        assert!(!range.contains(&Geohash::parse("9q8yx").unwrap()));
    }

    #[test]
    fn test_tilde_sorts_after_every_hash_character() {
        for &byte in base32::ALPHABET {
            assert!(byte < b'~');
        }
        // A subtree range therefore covers arbitrarily long extensions.
        let subtree = range("9q8y", "9q8y~");
        assert!(subtree.contains(&Geohash::parse("9q8yzzzzzz").unwrap()));
    }

    #[test]
    fn test_join_overlapping_ranges() {
        let lower = range("8", "h");
        let upper = range("9", "m");
        let merged = range("8", "m");
        assert_eq!(lower.join(&upper).unwrap(), merged);
        assert_eq!(upper.join(&lower).unwrap(), merged);
    }

    #[test]
    fn test_join_touching_ranges() {
        let lower = range("9s", "9w");
        let upper = range("9w", "9~");
        let merged = range("9s", "9~");
        assert_eq!(lower.join(&upper).unwrap(), merged);
        assert_eq!(upper.join(&lower).unwrap(), merged);
    }

    #[test]
    fn test_join_nested_ranges() {
        let outer = range("9", "m");
        let inner = range("9q", "9r");
        assert_eq!(inner.join(&outer).unwrap(), outer);
        assert_eq!(outer.join(&inner).unwrap(), outer);
    }

    #[test]
    fn test_join_identical_ranges() {
        let range = range("0", "h");
        assert_eq!(range.join(&range.clone()).unwrap(), range);
    }

    #[test]
    fn test_join_rejects_disjoint_ranges() {
        let first = range("0", "7");
        let second = range("9", "h");
        let err = first.join(&second).unwrap_err();
        match err {
            GeoRangeError::CannotJoin {
                first: a,
                second: b,
            } => {
                assert_eq!(a, first);
                assert_eq!(b, second);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_join_rejects_neighbors_across_base_prefixes() {
        // "0~" sorts before "10" on the first byte, so subtree sentinels
        // never bridge two different base prefixes.
        let below = range("0z", "0~");
        let above = range("10", "11");
        assert!(!below.can_join(&above));
        assert!(below.join(&above).is_err());
        assert!(above.join(&below).is_err());
    }

    #[test]
    fn test_can_join_matches_join_outcome() {
        let samples = [
            range("0", "7"),
            range("8", "h"),
            range("9", "m"),
            range("9q", "9r"),
            range("9s", "9w"),
            range("9w", "9~"),
            range("h", "~"),
        ];
        for a in &samples {
            for b in &samples {
                assert_eq!(a.can_join(b), a.join(b).is_ok());
                assert_eq!(a.can_join(b), b.can_join(a));
            }
        }
    }

    #[test]
    fn test_display_shows_half_open_interval() {
        assert_eq!(for_hash("9q8yy", 23).to_string(), "[9q8yw, 9q8y~)");
    }
}
