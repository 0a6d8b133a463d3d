use geo::Coord;
use thiserror::Error;

use crate::distance::haversine_distance;

/// Identifier assigned to a vehicle by the inventory service.
pub type VehicleId = u64;

/// A vehicle held by the inventory service.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`, in degrees.
/// The identifier is `None` until the service has stored the vehicle.
///
/// Values are never mutated in place. To change a vehicle, build a new one
/// and hand it to [`crate::VehicleWriter::update_vehicle`].
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fleetgeo_core::Vehicle;
///
/// let vehicle = Vehicle::new("Civic", "EX", 2019, "blue", 18_500, Coord { x: -0.12, y: 51.5 })
///     .with_id(7);
///
/// assert_eq!(vehicle.id, Some(7));
/// assert_eq!(vehicle.latitude(), 51.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: Option<VehicleId>,
    pub name: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub price: u64,
    pub location: Coord<f64>,
}

impl Vehicle {
    /// Construct a vehicle that has not been stored yet.
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        year: i32,
        color: impl Into<String>,
        price: u64,
        location: Coord<f64>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            model: model.into(),
            year,
            color: color.into(),
            price,
            location,
        }
    }

    /// Return a copy of this vehicle carrying `id`.
    #[must_use]
    pub fn with_id(self, id: VehicleId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }

    /// Great-circle distance to `other` in metres.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use fleetgeo_core::Vehicle;
    ///
    /// let a = Vehicle::new("a", "m", 2020, "red", 1, Coord { x: 0.0, y: 0.0 });
    /// let b = Vehicle::new("b", "m", 2020, "red", 1, Coord { x: 0.0, y: 0.0 });
    /// assert_eq!(a.distance_to(&b), 0.0);
    /// ```
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        haversine_distance(self.location, other.location)
    }
}

/// Errors returned by [`validate_location`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LocationError {
    /// Latitude was outside `[-90, 90]` or not finite.
    #[error("latitude {0} must be between -90 and 90 degrees")]
    Latitude(f64),
    /// Longitude was outside `[-180, 180]` or not finite.
    #[error("longitude {0} must be between -180 and 180 degrees")]
    Longitude(f64),
}

/// Check that `location` lies within the WGS84 coordinate ranges.
///
/// The distance and query functions assume valid input and never call this;
/// it exists for callers that build vehicles from untrusted input.
pub fn validate_location(location: Coord<f64>) -> Result<(), LocationError> {
    if !(-90.0..=90.0).contains(&location.y) {
        return Err(LocationError::Latitude(location.y));
    }
    if !(-180.0..=180.0).contains(&location.x) {
        return Err(LocationError::Longitude(location.x));
    }
    Ok(())
}
