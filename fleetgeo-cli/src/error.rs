//! Error types emitted by the fleetgeo CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use fleetgeo_core::{LocationError, QueryMiss, RepositoryError, VehicleId};
use fleetgeo_data::RepositoryBuildError;
use thiserror::Error;

/// Errors emitted by the fleetgeo CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// An option was supplied with a value the CLI cannot use.
    #[error("invalid --{field}: {reason}")]
    InvalidArgument {
        field: &'static str,
        reason: &'static str,
    },
    /// Constructing the HTTP repository failed.
    #[error("failed to build inventory client for {base_url:?}: {source}")]
    BuildRepository {
        base_url: String,
        #[source]
        source: RepositoryBuildError,
    },
    /// A vehicle location lies outside the WGS84 ranges.
    #[error(transparent)]
    InvalidLocation(#[from] LocationError),
    /// The inventory service request failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    /// `get` found no vehicle with the requested identifier.
    #[error("vehicle with id {id} not found")]
    VehicleNotFound { id: VehicleId },
    /// A geo query produced no result.
    #[error("no result: {0}")]
    Query(#[from] QueryMiss),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
