//! Data access traits for vehicles held by the inventory service.
//!
//! [`VehicleRepository`] is the read side the geo queries depend on.
//! [`VehicleWriter`] adds the create, update and delete operations used by
//! callers that manage the inventory.

use thiserror::Error;

use crate::{Vehicle, VehicleId};

/// Errors raised while talking to the inventory service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The service has no vehicle with the requested identifier.
    #[error("vehicle with id {id} not found")]
    NotFound {
        /// Identifier that was requested.
        id: VehicleId,
    },
    /// The service rejected the submitted vehicle.
    #[error("bad request: {message}")]
    BadRequest {
        /// Body of the rejection, as sent by the service.
        message: String,
    },
    /// An update was attempted on a vehicle that has no identifier.
    #[error("vehicle must have an id to be updated")]
    MissingId,
    /// The service answered with an unexpected HTTP status.
    #[error("request to {url} failed with status {status}: {message}")]
    HttpError {
        /// Fully qualified request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Fully qualified request URL.
        url: String,
        /// Timeout that elapsed.
        timeout_secs: u64,
    },
    /// The request failed before a response was received.
    #[error("network error contacting {url}: {message}")]
    NetworkError {
        /// Fully qualified request URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse response: {message}")]
    ParseError {
        /// Decoder error description.
        message: String,
    },
}

/// Read-only access to the vehicle inventory.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use fleetgeo_core::{RepositoryError, Vehicle, VehicleId, VehicleRepository};
///
/// struct Fixed(Vec<Vehicle>);
///
/// impl VehicleRepository for Fixed {
///     fn fetch_vehicle(&self, id: VehicleId) -> Result<Option<Vehicle>, RepositoryError> {
///         Ok(self.0.iter().find(|v| v.id == Some(id)).cloned())
///     }
///
///     fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, RepositoryError> {
///         Ok(self.0.clone())
///     }
/// }
///
/// let repo = Fixed(vec![
///     Vehicle::new("a", "m", 2020, "red", 1, Coord { x: 0.0, y: 0.0 }).with_id(1),
/// ]);
/// assert!(repo.fetch_vehicle(1)?.is_some());
/// assert!(repo.fetch_vehicle(2)?.is_none());
/// # Ok::<(), RepositoryError>(())
/// ```
pub trait VehicleRepository {
    /// Fetch a single vehicle.
    ///
    /// Returns `Ok(None)` when the service has no vehicle with `id`.
    fn fetch_vehicle(&self, id: VehicleId) -> Result<Option<Vehicle>, RepositoryError>;

    /// Fetch every vehicle, in the order the service lists them.
    fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, RepositoryError>;
}

/// Mutating operations on the vehicle inventory.
pub trait VehicleWriter: VehicleRepository {
    /// Store a new vehicle and return it with its assigned identifier.
    ///
    /// Any identifier already present on `vehicle` is sent as-is; the
    /// service decides whether to honour it.
    fn create_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle, RepositoryError>;

    /// Replace the stored vehicle that shares `vehicle.id`.
    ///
    /// Implementations must return [`RepositoryError::MissingId`] when
    /// `vehicle.id` is `None`.
    fn update_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle, RepositoryError>;

    /// Remove the vehicle with `id`.
    fn delete_vehicle(&self, id: VehicleId) -> Result<(), RepositoryError>;
}

impl<T: VehicleRepository + ?Sized> VehicleRepository for &T {
    fn fetch_vehicle(&self, id: VehicleId) -> Result<Option<Vehicle>, RepositoryError> {
        (**self).fetch_vehicle(id)
    }

    fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, RepositoryError> {
        (**self).fetch_vehicles()
    }
}

impl<T: VehicleRepository + ?Sized> VehicleRepository for Box<T> {
    fn fetch_vehicle(&self, id: VehicleId) -> Result<Option<Vehicle>, RepositoryError> {
        (**self).fetch_vehicle(id)
    }

    fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, RepositoryError> {
        (**self).fetch_vehicles()
    }
}

impl<T: VehicleWriter + ?Sized> VehicleWriter for &T {
    fn create_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle, RepositoryError> {
        (**self).create_vehicle(vehicle)
    }

    fn update_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle, RepositoryError> {
        (**self).update_vehicle(vehicle)
    }

    fn delete_vehicle(&self, id: VehicleId) -> Result<(), RepositoryError> {
        (**self).delete_vehicle(id)
    }
}

impl<T: VehicleWriter + ?Sized> VehicleWriter for Box<T> {
    fn create_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle, RepositoryError> {
        (**self).create_vehicle(vehicle)
    }

    fn update_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle, RepositoryError> {
        (**self).update_vehicle(vehicle)
    }

    fn delete_vehicle(&self, id: VehicleId) -> Result<(), RepositoryError> {
        (**self).delete_vehicle(id)
    }
}
