//! Data access for the fleetgeo vehicle inventory.
//!
//! Responsibilities:
//! - Implement the `fleetgeo-core` repository traits against the remote
//!   inventory service.
//! - Own the JSON wire format and the HTTP status mapping.
//!
//! Boundaries:
//! - Do not encode domain rules (live in `fleetgeo-core`).
//! - Keep the synchronous trait surface; async I/O stays internal.
//!
//! Invariants:
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod http;

pub use http::{
    DEFAULT_USER_AGENT, HttpVehicleRepository, HttpVehicleRepositoryConfig, RepositoryBuildError,
    VehicleRecord,
};
