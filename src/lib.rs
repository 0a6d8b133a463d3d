//! Facade crate for the fleetgeo vehicle inventory client.
//!
//! This crate re-exports the core domain types and geo queries, and exposes
//! the HTTP-backed repository behind the `http` feature flag.
//!
//! # Examples
//! ```
//! use fleetgeo::{GeoQueryEngine, Vehicle, VehicleId, VehicleRepository, RepositoryError};
//! use geo::Coord;
//!
//! struct Fixed(Vec<Vehicle>);
//!
//! impl VehicleRepository for Fixed {
//!     fn fetch_vehicle(&self, id: VehicleId) -> Result<Option<Vehicle>, RepositoryError> {
//!         Ok(self.0.iter().find(|v| v.id == Some(id)).cloned())
//!     }
//!
//!     fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, RepositoryError> {
//!         Ok(self.0.clone())
//!     }
//! }
//!
//! let at = |id, x, y| Vehicle::new("v", "m", 2020, "red", 1, Coord { x, y }).with_id(id);
//! let engine = GeoQueryEngine::new(Fixed(vec![at(1, 0.0, 0.0), at(2, 0.0, 1.0)]));
//!
//! assert_eq!(engine.nearest_vehicle(1).and_then(|v| v.id), Some(2));
//! ```

#![forbid(unsafe_code)]

pub use fleetgeo_core::{
    EARTH_RADIUS_METRES, GeoQueryEngine, LocationError, Nearest, QueryMiss, RepositoryError,
    Vehicle, VehicleFilter, VehicleId, VehicleRepository, VehicleWriter, filter_vehicles,
    haversine_distance, nearest_to, validate_location,
};

#[cfg(feature = "http")]
pub use fleetgeo_data::{
    HttpVehicleRepository, HttpVehicleRepositoryConfig, RepositoryBuildError, VehicleRecord,
};
