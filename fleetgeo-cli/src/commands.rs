//! Subcommands and their execution against a [`VehicleWriter`].
//!
//! Every command writes its result to the supplied writer as pretty-printed
//! JSON. Vehicles are rendered in the same shape the inventory service uses.

use std::io::Write;

use clap::{Args, Subcommand};
use fleetgeo_core::{
    GeoQueryEngine, Vehicle, VehicleFilter, VehicleId, VehicleWriter, filter_vehicles,
    validate_location,
};
use fleetgeo_data::VehicleRecord;
use geo::Coord;
use log::debug;
use serde::Serialize;

use crate::CliError;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List every vehicle in the inventory.
    List,
    /// Show a single vehicle.
    Get(IdArgs),
    /// List vehicles whose attributes equal every given value.
    Filter(FilterArgs),
    /// Add a vehicle to the inventory.
    Add(VehicleArgs),
    /// Replace the stored attributes of a vehicle.
    Update(UpdateArgs),
    /// Remove a vehicle from the inventory.
    Delete(IdArgs),
    /// Great-circle distance in metres between two vehicles.
    Distance(DistanceArgs),
    /// Find the vehicle closest to another one.
    Nearest(IdArgs),
}

#[derive(Debug, Clone, Args)]
pub(crate) struct IdArgs {
    /// Vehicle identifier.
    #[arg(value_name = "id")]
    pub(crate) id: VehicleId,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct DistanceArgs {
    /// Identifier of the first vehicle.
    #[arg(value_name = "first")]
    pub(crate) first: VehicleId,
    /// Identifier of the second vehicle.
    #[arg(value_name = "second")]
    pub(crate) second: VehicleId,
}

/// Full attribute set of a vehicle to add or update.
#[derive(Debug, Clone, Args)]
pub(crate) struct VehicleArgs {
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long)]
    pub(crate) model: String,
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) year: i32,
    #[arg(long)]
    pub(crate) color: String,
    #[arg(long)]
    pub(crate) price: u64,
    /// Latitude in degrees, within [-90, 90].
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) latitude: f64,
    /// Longitude in degrees, within [-180, 180].
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) longitude: f64,
}

impl VehicleArgs {
    /// Build a vehicle, rejecting coordinates outside the WGS84 ranges.
    pub(crate) fn into_vehicle(self) -> Result<Vehicle, CliError> {
        let location = Coord {
            x: self.longitude,
            y: self.latitude,
        };
        validate_location(location)?;
        Ok(Vehicle::new(
            self.name, self.model, self.year, self.color, self.price, location,
        ))
    }
}

#[derive(Debug, Clone, Args)]
pub(crate) struct UpdateArgs {
    /// Identifier of the vehicle to update.
    #[arg(value_name = "id")]
    pub(crate) id: VehicleId,
    #[command(flatten)]
    pub(crate) vehicle: VehicleArgs,
}

#[derive(Debug, Clone, Default, Args)]
pub(crate) struct FilterArgs {
    #[arg(long)]
    pub(crate) name: Option<String>,
    #[arg(long)]
    pub(crate) model: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) year: Option<i32>,
    #[arg(long)]
    pub(crate) color: Option<String>,
    #[arg(long)]
    pub(crate) price: Option<u64>,
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) latitude: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) longitude: Option<f64>,
}

impl From<FilterArgs> for VehicleFilter {
    fn from(args: FilterArgs) -> Self {
        Self {
            name: args.name,
            model: args.model,
            year: args.year,
            color: args.color,
            price: args.price,
            latitude: args.latitude,
            longitude: args.longitude,
        }
    }
}

#[derive(Debug, Serialize)]
struct DeletedReport {
    deleted: VehicleId,
}

#[derive(Debug, Serialize)]
struct DistanceReport {
    first: VehicleId,
    second: VehicleId,
    distance_metres: f64,
}

#[derive(Debug, Serialize)]
struct NearestReport {
    target: VehicleId,
    nearest: VehicleRecord,
    distance_metres: f64,
}

/// Execute `command` against `repository`, writing JSON output to `writer`.
pub(crate) fn run_command(
    command: Command,
    repository: &dyn VehicleWriter,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    debug!("running {command:?}");
    match command {
        Command::List => {
            let vehicles = repository.fetch_vehicles()?;
            write_json(writer, &records(&vehicles))
        }
        Command::Get(IdArgs { id }) => {
            let vehicle = repository
                .fetch_vehicle(id)?
                .ok_or(CliError::VehicleNotFound { id })?;
            write_json(writer, &VehicleRecord::from(&vehicle))
        }
        Command::Filter(args) => {
            let vehicles = filter_vehicles(repository, &VehicleFilter::from(args))?;
            write_json(writer, &records(&vehicles))
        }
        Command::Add(args) => {
            let created = repository.create_vehicle(&args.into_vehicle()?)?;
            write_json(writer, &VehicleRecord::from(&created))
        }
        Command::Update(UpdateArgs { id, vehicle }) => {
            let vehicle = vehicle.into_vehicle()?.with_id(id);
            let updated = repository.update_vehicle(&vehicle)?;
            write_json(writer, &VehicleRecord::from(&updated))
        }
        Command::Delete(IdArgs { id }) => {
            repository.delete_vehicle(id)?;
            write_json(writer, &DeletedReport { deleted: id })
        }
        Command::Distance(DistanceArgs { first, second }) => {
            let distance_metres = GeoQueryEngine::new(repository).try_distance(first, second)?;
            write_json(
                writer,
                &DistanceReport {
                    first,
                    second,
                    distance_metres,
                },
            )
        }
        Command::Nearest(IdArgs { id }) => {
            let nearest = GeoQueryEngine::new(repository).try_nearest_vehicle(id)?;
            write_json(
                writer,
                &NearestReport {
                    target: id,
                    nearest: VehicleRecord::from(&nearest.vehicle),
                    distance_metres: nearest.distance_metres,
                },
            )
        }
    }
}

fn records(vehicles: &[Vehicle]) -> Vec<VehicleRecord> {
    vehicles.iter().map(VehicleRecord::from).collect()
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
