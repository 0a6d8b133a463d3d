//! Layered connection settings for the inventory service.

use std::time::Duration;

use clap::Parser;
use fleetgeo_data::{HttpVehicleRepository, HttpVehicleRepositoryConfig};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{ARG_BASE_URL, ARG_TIMEOUT_SECS, CliError, ENV_BASE_URL};

/// Connection settings shared by every subcommand.
///
/// Values are layered from defaults, configuration files, `FLEETGEO_*`
/// environment variables and finally the global CLI flags.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "connection",
    about = "Inventory service connection settings"
)]
#[ortho_config(prefix = "FLEETGEO")]
pub(crate) struct ConnectionArgs {
    /// Base URL of the inventory service.
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// Request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl ConnectionArgs {
    pub(crate) fn into_config(self) -> Result<ConnectionConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ConnectionConfig::try_from(merged)
    }
}

/// Resolved connection configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConnectionConfig {
    /// Base URL of the inventory service.
    pub(crate) base_url: String,
    /// Request timeout.
    pub(crate) timeout: Duration,
}

impl ConnectionConfig {
    pub(crate) fn build_repository(&self) -> Result<HttpVehicleRepository, CliError> {
        let config =
            HttpVehicleRepositoryConfig::new(self.base_url.clone()).with_timeout(self.timeout);
        HttpVehicleRepository::with_config(config).map_err(|source| CliError::BuildRepository {
            base_url: self.base_url.clone(),
            source,
        })
    }
}

impl TryFrom<ConnectionArgs> for ConnectionConfig {
    type Error = CliError;

    fn try_from(args: ConnectionArgs) -> Result<Self, Self::Error> {
        let base_url = args.base_url.ok_or(CliError::MissingArgument {
            field: ARG_BASE_URL,
            env: ENV_BASE_URL,
        })?;
        let timeout = match args.timeout_secs {
            Some(0) => {
                return Err(CliError::InvalidArgument {
                    field: ARG_TIMEOUT_SECS,
                    reason: "must be at least one second",
                });
            }
            Some(secs) => Duration::from_secs(secs),
            None => HttpVehicleRepositoryConfig::default().timeout,
        };
        Ok(Self { base_url, timeout })
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ConnectionConfig, CliError> {
    let merged = ConnectionArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ConnectionConfig::try_from(merged)
}
