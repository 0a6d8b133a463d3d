//! JSON representation of vehicles exchanged with the inventory service.
//!
//! The service sends and accepts flat objects carrying `latitude` and
//! `longitude` fields. `id` is omitted from request bodies for vehicles that
//! have not been stored yet.

use fleetgeo_core::{Vehicle, VehicleId};
use geo::Coord;
use serde::{Deserialize, Serialize};

/// A vehicle as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// Identifier assigned by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<VehicleId>,
    /// Vehicle name, usually the make.
    pub name: String,
    /// Model name.
    pub model: String,
    /// Model year.
    pub year: i32,
    /// Paint colour.
    pub color: String,
    /// Listed price.
    pub price: u64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl From<VehicleRecord> for Vehicle {
    fn from(record: VehicleRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            model: record.model,
            year: record.year,
            color: record.color,
            price: record.price,
            location: Coord {
                x: record.longitude,
                y: record.latitude,
            },
        }
    }
}

impl From<&Vehicle> for VehicleRecord {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id,
            name: vehicle.name.clone(),
            model: vehicle.model.clone(),
            year: vehicle.year,
            color: vehicle.color.clone(),
            price: vehicle.price,
            latitude: vehicle.latitude(),
            longitude: vehicle.longitude(),
        }
    }
}
