//! HTTP-backed vehicle repository.
//!
//! This module provides [`HttpVehicleRepository`], an implementation of
//! [`fleetgeo_core::VehicleRepository`] and [`fleetgeo_core::VehicleWriter`]
//! that talks to a REST inventory service exposing `/vehicles` and
//! `/vehicles/{id}`.
//!
//! # Architecture
//!
//! The repository traits are synchronous so the geo queries stay embeddable
//! in synchronous contexts. The repository blocks on async `reqwest` calls
//! internally.
//!
//! # Example
//!
//! ```no_run
//! use fleetgeo_core::{GeoQueryEngine, VehicleRepository};
//! use fleetgeo_data::http::{HttpVehicleRepository, HttpVehicleRepositoryConfig};
//! use std::time::Duration;
//!
//! let config = HttpVehicleRepositoryConfig::new("http://localhost:8000")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("my-app/1.0");
//! let repository = HttpVehicleRepository::with_config(config)?;
//!
//! let vehicles = repository.fetch_vehicles()?;
//! let engine = GeoQueryEngine::new(repository);
//! if let Some(nearest) = engine.nearest_vehicle(1) {
//!     println!("closest to 1 is {:?} out of {}", nearest.id, vehicles.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod repository;
mod wire;

pub use repository::{
    DEFAULT_USER_AGENT, HttpVehicleRepository, HttpVehicleRepositoryConfig, RepositoryBuildError,
};
pub use wire::VehicleRecord;
