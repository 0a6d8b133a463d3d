//! Great-circle distance on a spherical Earth.
//!
//! [`haversine_distance`] takes two WGS84 coordinates (`x = longitude`,
//! `y = latitude`, degrees) and returns the surface distance in metres.
//!
//! The intermediate haversine term is not clamped to `[0, 1]`. For nearly
//! antipodal points rounding can push it marginally past `1.0`, in which case
//! `sqrt(1 - a)` is NaN and so is the result.

use geo::Coord;

/// Mean Earth radius used by [`haversine_distance`], in metres.
pub const EARTH_RADIUS_METRES: f64 = 6_371_000.0;

/// Great-circle distance between `from` and `to` in metres.
///
/// Non-finite coordinates propagate to a NaN or infinite result.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fleetgeo_core::haversine_distance;
///
/// let new_york = Coord { x: -74.0060, y: 40.7128 };
/// let los_angeles = Coord { x: -118.2437, y: 34.0522 };
/// let metres = haversine_distance(new_york, los_angeles);
/// assert!((metres - 3_935_746.0).abs() < 1_000.0);
/// ```
#[must_use]
pub fn haversine_distance(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let phi1 = from.y.to_radians();
    let phi2 = to.y.to_radians();
    let delta_phi = (to.y - from.y).to_radians();
    let delta_lambda = (to.x - from.x).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METRES * c
}
