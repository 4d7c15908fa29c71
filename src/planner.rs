//! Radius query planning.
//!
//! [`plan_ranges`] turns a circular query into a small set of half-open
//! string ranges over geohash space. Scanning an ordered index of
//! precision-10 geohashes with those ranges returns a superset of the
//! documents inside the circle; callers re-check candidates with
//! [`haversine_distance`](crate::geom::haversine_distance).
//!
//! Planning is pure: no state, no I/O, no randomness. The same center and
//! radius always produce the same set.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::base32;
use crate::geohash::{self, MAX_PRECISION_BITS};
use crate::geom;
use crate::location::Location;
use crate::range::GeohashRange;

// Bits of latitude resolution at which one cell spans `resolution` metres.
fn latitude_bits_for_resolution(resolution: f64) -> f64 {
    (geom::EARTH_MERIDIONAL_CIRCUMFERENCE / (2.0 * resolution)).log2()
}

fn longitude_bits_for_resolution(resolution: f64, latitude: f64) -> f64 {
    let degrees = geom::metres_to_longitude_degrees(resolution, latitude);
    if degrees.abs() > 0.0 {
        (360.0 / degrees).log2().max(1.0)
    } else {
        1.0
    }
}

/// Picks the interleaved bit count whose cells are at least as wide as the
/// bounding box of a circle of `size` metres around `location`, on both
/// axes and at both bounding latitudes.
///
/// Kept in floating point until the final cast so that degenerate inputs
/// (zero size gives infinite bits) clamp instead of overflowing.
fn bits_for_bounding_box(location: &Location, size: f64) -> i64 {
    let lat_delta = geom::metres_to_latitude_degrees(size);
    let lat_north = (location.lat() + lat_delta).min(90.0);
    let lat_south = (location.lat() - lat_delta).max(-90.0);

    let bits_latitude =
        (latitude_bits_for_resolution(size).floor() * 2.0).min(MAX_PRECISION_BITS as f64);
    let bits_longitude_north = longitude_bits_for_resolution(size, lat_north).floor() * 2.0 - 1.0;
    let bits_longitude_south = longitude_bits_for_resolution(size, lat_south).floor() * 2.0 - 1.0;

    bits_latitude.min(bits_longitude_north).min(bits_longitude_south) as i64
}

/// Plans the scan ranges for a radius query.
///
/// The bit precision is chosen so that a single geohash cell is at least as
/// large as the query's bounding box on both axes. Nine probe points (the
/// center plus eight compass points on the bounding box) are encoded at
/// that precision, each probe becomes a range via
/// [`GeohashRange::for_hash`], and overlapping or touching ranges are
/// coalesced until no pair can be joined.
///
/// East and west probes wrap across the antimeridian, so a query near
/// longitude 180 produces ranges on both sides of the date line.
///
/// # Arguments
///
/// * `center` - Center of the query circle
/// * `radius_metres` - Radius in metres; see
///   [`cap_radius_km`](crate::geom::cap_radius_km) for the supported
///   maximum
///
/// # Returns
///
/// A set of pairwise disjoint, non-joinable ranges covering every
/// precision-10 geohash within `radius_metres` of `center`.
///
/// # Examples
///
/// ```rust
/// use georange::{Geohash, Location, plan_ranges};
///
/// let center = Location::new(37.7749, -122.4194)?;
/// let ranges = plan_ranges(&center, 500.0);
///
/// // The center's own hash falls in exactly one of the planned ranges.
/// let hash = Geohash::from(&center);
/// assert_eq!(ranges.iter().filter(|r| r.contains(&hash)).count(), 1);
/// # Ok::<(), georange::GeoRangeError>(())
/// ```
pub fn plan_ranges(center: &Location, radius_metres: f64) -> FxHashSet<GeohashRange> {
    let query_bits = bits_for_bounding_box(center, radius_metres).max(1) as usize;
    let precision = query_bits.div_ceil(base32::BITS_PER_CHAR);

    let lat_delta = geom::metres_to_latitude_degrees(radius_metres);
    let lat_north = (center.lat() + lat_delta).min(90.0);
    let lat_south = (center.lat() - lat_delta).max(-90.0);
    let lon_delta = geom::metres_to_longitude_degrees(radius_metres, lat_north)
        .max(geom::metres_to_longitude_degrees(radius_metres, lat_south));
    let lon_west = geom::wrap_longitude(center.lon() - lon_delta);
    let lon_east = geom::wrap_longitude(center.lon() + lon_delta);

    let mut ranges = FxHashSet::default();
    for lat in [center.lat(), lat_north, lat_south] {
        for lon in [center.lon(), lon_west, lon_east] {
            let hash = geohash::interleave(lat, lon, precision);
            ranges.insert(GeohashRange::for_hash(&hash, query_bits));
        }
    }

    coalesce(ranges)
}

/// Joins ranges to a fixed point.
///
/// Each pass merges the first joinable pair and rescans. The scan order
/// only affects intermediate states; joining is confluent, so the fixed
/// point is the same whatever order the set iterates in.
fn coalesce(ranges: FxHashSet<GeohashRange>) -> FxHashSet<GeohashRange> {
    let mut working: SmallVec<[GeohashRange; 9]> = ranges.into_iter().collect();

    loop {
        let mut joined = None;
        'scan: for i in 0..working.len() {
            for j in (i + 1)..working.len() {
                if let Ok(merged) = working[i].join(&working[j]) {
                    joined = Some((i, j, merged));
                    break 'scan;
                }
            }
        }
        match joined {
            Some((i, j, merged)) => {
                // j > i, so removing j first leaves i in place.
                working.swap_remove(j);
                working.swap_remove(i);
                working.push(merged);
            }
            None => break,
        }
    }

    working.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geohash::{DEFAULT_PRECISION, Geohash};

    fn location(lat: f64, lon: f64) -> Location {
        Location::new(lat, lon).unwrap()
    }

    fn assert_single_range(ranges: &FxHashSet<GeohashRange>, start: &str, end: &str) {
        assert_eq!(ranges.len(), 1, "expected one range, got {ranges:?}");
        let range = ranges.iter().next().unwrap();
        assert_eq!(range.start(), start);
        assert_eq!(range.end(), end);
    }

    #[test]
    fn test_whole_world_radius_collapses_to_one_range() {
        let ranges = plan_ranges(&location(0.0, 0.0), 8_587_000.0);
        assert_single_range(&ranges, "0", "~");
    }

    #[test]
    fn test_poles_plan_at_minimum_precision() {
        // At the pole every east/west probe wraps back onto the center
        // meridian, so the plan degenerates to the center's own range.
        let ranges = plan_ranges(&location(90.0, 0.0), 1000.0);
        assert_single_range(&ranges, "0", "h");
    }

    #[test]
    fn test_zero_radius_plans_a_single_bit() {
        let ranges = plan_ranges(&location(10.0, 10.0), 0.0);
        assert_single_range(&ranges, "h", "~");
    }

    #[test]
    fn test_city_block_plan_covers_center_exactly_once() {
        let center = location(37.7749, -122.4194);
        let ranges = plan_ranges(&center, 500.0);

        assert!(!ranges.is_empty());
        assert!(ranges.len() <= 9);
        for range in &ranges {
            assert!(range.start() < range.end());
        }

        let hash = Geohash::from(&center);
        let covering = ranges.iter().filter(|r| r.contains(&hash)).count();
        assert_eq!(covering, 1);
    }

    #[test]
    fn test_tiny_radius_plans_at_stored_hash_precision() {
        // A one-metre query still plans at 48 bits, ten characters: the
        // bounds of every range differ only in their last character.
        let ranges = plan_ranges(&location(0.0, 0.0), 1.0);

        assert!(ranges.len() >= 2, "origin straddles quadrants: {ranges:?}");
        for range in &ranges {
            assert_eq!(range.start().len(), DEFAULT_PRECISION);
            assert_eq!(range.end().len(), DEFAULT_PRECISION);
            assert_eq!(range.start()[..9], range.end()[..9]);
        }

        let hash = Geohash::encode(0.0, 0.0, DEFAULT_PRECISION).unwrap();
        assert_eq!(hash.as_str(), "7zzzzzzzzz");
        assert_eq!(ranges.iter().filter(|r| r.contains(&hash)).count(), 1);
    }

    #[test]
    fn test_kilometre_radius_plans_six_characters() {
        let ranges = plan_ranges(&location(0.5, 0.5), 1000.0);
        for range in &ranges {
            assert_eq!(range.start().len(), 6, "{range}");
            assert_eq!(range.end().len(), 6, "{range}");
        }
    }

    #[test]
    fn test_planned_ranges_are_disjoint_and_unjoinable() {
        let cases = [
            (location(37.7749, -122.4194), 500.0),
            (location(51.5074, -0.1278), 25_000.0),
            (location(-33.8688, 151.2093), 150_000.0),
            (location(0.0, 179.9), 50_000.0),
        ];
        for (center, radius) in cases {
            let ranges: Vec<_> = plan_ranges(&center, radius).into_iter().collect();
            for i in 0..ranges.len() {
                for j in (i + 1)..ranges.len() {
                    let (a, b) = (&ranges[i], &ranges[j]);
                    assert!(!a.can_join(b), "{a} and {b} should have been joined");
                    assert!(
                        a.end() < b.start() || b.end() < a.start(),
                        "{a} and {b} overlap"
                    );
                }
            }
        }
    }

    #[test]
    fn test_planning_is_deterministic() {
        let center = location(40.7128, -74.0060);
        assert_eq!(plan_ranges(&center, 3000.0), plan_ranges(&center, 3000.0));
    }

    #[test]
    fn test_large_radius_needs_fewer_bits_than_small() {
        let center = location(45.0, 9.0);
        let coarse = bits_for_bounding_box(&center, 1_000_000.0);
        let medium = bits_for_bounding_box(&center, 10_000.0);
        let fine = bits_for_bounding_box(&center, 10.0);
        assert!(coarse < medium);
        assert!(medium < fine);
        assert!(fine <= MAX_PRECISION_BITS as i64);
    }

    #[test]
    fn test_degenerate_sizes_stay_in_bit_domain() {
        let center = location(0.0, 0.0);
        assert_eq!(
            bits_for_bounding_box(&center, 0.0).max(1),
            1,
            "zero size must clamp, not overflow"
        );
        let bits = bits_for_bounding_box(&center, f64::MIN_POSITIVE).max(1);
        assert!((1..=MAX_PRECISION_BITS as i64).contains(&bits));
    }
}
