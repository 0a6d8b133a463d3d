//! Test helpers for running CLI commands against an in-memory inventory.

use super::*;
use fleetgeo_core::test_support::MemoryRepository;
use fleetgeo_core::{Vehicle, VehicleId};
use geo::Coord;
use serde_json::Value;

pub(super) const LONDON: VehicleId = 1;
pub(super) const PARIS: VehicleId = 2;
pub(super) const BRISTOL: VehicleId = 3;

fn vehicle(id: VehicleId, name: &str, color: &str, latitude: f64, longitude: f64) -> Vehicle {
    Vehicle::new(
        name,
        "Estate",
        2020,
        color,
        15_000,
        Coord {
            x: longitude,
            y: latitude,
        },
    )
    .with_id(id)
}

/// Three vehicles: London and Bristol are red, Paris is blue.
pub(super) fn inventory() -> MemoryRepository {
    MemoryRepository::with_vehicles([
        vehicle(LONDON, "London", "red", 51.5074, -0.1278),
        vehicle(PARIS, "Paris", "blue", 48.8566, 2.3522),
        vehicle(BRISTOL, "Bristol", "red", 51.4545, -2.5879),
    ])
}

/// Parse `argv` and run the resulting command, returning its stdout.
pub(super) fn execute(
    repository: &MemoryRepository,
    argv: &[&str],
) -> Result<Value, CliError> {
    let mut invocation = vec!["fleetgeo"];
    invocation.extend_from_slice(argv);
    let cli = Cli::try_parse_from(invocation)?;
    let mut stdout = Vec::new();
    run_command(cli.command, repository, &mut stdout)?;
    Ok(serde_json::from_slice(&stdout).expect("command output should be JSON"))
}
