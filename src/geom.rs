//! Earth-model constants and geometric primitives.
//!
//! Everything the planner needs from geometry lives here: Haversine distance
//! on the mean-radius sphere, metre-to-degree conversions along both axes
//! (the longitude axis with an eccentricity correction so boxes stay wide
//! enough at high latitudes), longitude wrapping across the antimeridian, and
//! the hard query-radius cap.

use crate::location::Location;

/// Metres covered by one degree of latitude, treated as constant.
pub const METRES_PER_DEGREE_LATITUDE: f64 = 110_574.0;

/// Length of a meridian circle of the Earth, in metres.
pub const EARTH_MERIDIONAL_CIRCUMFERENCE: f64 = 40_007_860.0;

/// WGS84 equatorial radius, in metres.
pub const EARTH_EQ_RADIUS: f64 = 6_378_137.0;

/// WGS84 polar radius, in metres.
pub const EARTH_POLAR_RADIUS: f64 = 6_357_852.3;

/// WGS84 first eccentricity, squared.
pub const EARTH_E2: f64 = 0.006_694_478_197_99;

/// Threshold below which a metres-per-degree factor is treated as zero.
pub const EPSILON: f64 = 1e-12;

/// Largest radius, in kilometres, a query is allowed to use.
pub const MAX_SUPPORTED_RADIUS_KM: f64 = 8587.0;

const EARTH_MEAN_RADIUS: f64 = (EARTH_EQ_RADIUS + EARTH_POLAR_RADIUS) / 2.0;

/// Great-circle distance between two locations, in metres.
///
/// Haversine formula on a sphere of radius
/// `(EARTH_EQ_RADIUS + EARTH_POLAR_RADIUS) / 2`.
///
/// # Examples
///
/// ```rust
/// use georange::{Location, geom::haversine_distance};
///
/// let nyc = Location::new(40.7128, -74.0060)?;
/// let la = Location::new(34.0522, -118.2437)?;
///
/// let dist = haversine_distance(&nyc, &la);
/// assert!(dist > 3_900_000.0 && dist < 4_000_000.0); // ~3,942 km
/// # Ok::<(), georange::GeoRangeError>(())
/// ```
pub fn haversine_distance(a: &Location, b: &Location) -> f64 {
    let lat_delta = (a.lat() - b.lat()).to_radians();
    let lon_delta = (a.lon() - b.lon()).to_radians();

    let h = (lat_delta / 2.0).sin().powi(2)
        + a.lat().to_radians().cos() * b.lat().to_radians().cos() * (lon_delta / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_MEAN_RADIUS * c
}

/// Degrees of latitude spanned by `distance` metres.
#[inline]
pub fn metres_to_latitude_degrees(distance: f64) -> f64 {
    distance / METRES_PER_DEGREE_LATITUDE
}

/// Degrees of longitude spanned by `distance` metres at the given latitude.
///
/// Applies the ellipsoidal eccentricity correction to the metres-per-degree
/// factor. Near the poles the factor collapses toward zero, in which case any
/// positive distance spans the full `360` degrees. The result is capped at
/// `360`.
pub fn metres_to_longitude_degrees(distance: f64, latitude: f64) -> f64 {
    let radians = latitude.to_radians();
    let numerator = radians.cos() * EARTH_EQ_RADIUS * std::f64::consts::PI / 180.0;
    let denominator = 1.0 / (1.0 - EARTH_E2 * radians.sin() * radians.sin()).sqrt();
    let delta_degrees = numerator * denominator;

    if delta_degrees < EPSILON {
        if distance > 0.0 { 360.0 } else { distance }
    } else {
        (distance / delta_degrees).min(360.0)
    }
}

/// Wraps a longitude into `[-180, 180]`.
///
/// # Examples
///
/// ```rust
/// use georange::geom::wrap_longitude;
///
/// assert_eq!(wrap_longitude(190.0), -170.0);
/// assert_eq!(wrap_longitude(-190.0), 170.0);
/// assert_eq!(wrap_longitude(540.0), -180.0);
/// assert_eq!(wrap_longitude(0.0), 0.0);
/// ```
pub fn wrap_longitude(longitude: f64) -> f64 {
    if (-180.0..=180.0).contains(&longitude) {
        return longitude;
    }
    let adjusted = longitude + 180.0;
    if adjusted > 0.0 {
        adjusted.rem_euclid(360.0) - 180.0
    } else {
        180.0 - (-adjusted).rem_euclid(360.0)
    }
}

/// Caps a query radius, in kilometres, at [`MAX_SUPPORTED_RADIUS_KM`].
///
/// Over-large radii are not an error: the radius is silently reduced and a
/// warning is logged.
///
/// # Examples
///
/// ```rust
/// use georange::geom::cap_radius_km;
///
/// assert_eq!(cap_radius_km(10.0), 10.0);
/// assert_eq!(cap_radius_km(20_000.0), 8587.0);
/// ```
pub fn cap_radius_km(radius_km: f64) -> f64 {
    if radius_km > MAX_SUPPORTED_RADIUS_KM {
        log::warn!(
            "radius of {radius_km} km is larger than the supported {MAX_SUPPORTED_RADIUS_KM} km, using the maximum"
        );
        return MAX_SUPPORTED_RADIUS_KM;
    }
    radius_km
}
