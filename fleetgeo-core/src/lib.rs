//! Core domain types for fleetgeo.
//!
//! The crate models a [`Vehicle`] held by a remote inventory service and
//! answers geographic questions about it: how far apart two vehicles are and
//! which vehicle is closest to a given one. Data access is abstracted behind
//! [`VehicleRepository`], so the queries run the same against an HTTP client
//! or an in-memory fixture.

#![forbid(unsafe_code)]

pub mod distance;
pub mod filter;
pub mod query;
pub mod repository;
mod vehicle;

#[doc(hidden)]
pub mod test_support;

pub use distance::{EARTH_RADIUS_METRES, haversine_distance};
pub use filter::{VehicleFilter, filter_vehicles};
pub use query::{GeoQueryEngine, Nearest, QueryMiss, nearest_to};
pub use repository::{RepositoryError, VehicleRepository, VehicleWriter};
pub use vehicle::{LocationError, Vehicle, VehicleId, validate_location};
