//! In-memory repositories used by unit and behaviour tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use geo::Coord;

use crate::{RepositoryError, Vehicle, VehicleId, VehicleRepository, VehicleWriter};

/// In-memory `VehicleRepository` implementation used in tests.
///
/// Vehicles are kept in insertion order and every read is counted so tests
/// can assert which fetches a query performed.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    vehicles: Mutex<Vec<Vehicle>>,
    single_fetches: AtomicUsize,
    collection_fetches: AtomicUsize,
}

impl MemoryRepository {
    /// Create a repository from a collection of vehicles.
    pub fn with_vehicles<I>(vehicles: I) -> Self
    where
        I: IntoIterator<Item = Vehicle>,
    {
        Self {
            vehicles: Mutex::new(vehicles.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Number of `fetch_vehicle` calls served so far.
    pub fn single_fetches(&self) -> usize {
        self.single_fetches.load(Ordering::SeqCst)
    }

    /// Number of `fetch_vehicles` calls served so far.
    pub fn collection_fetches(&self) -> usize {
        self.collection_fetches.load(Ordering::SeqCst)
    }

    fn vehicles(&self) -> MutexGuard<'_, Vec<Vehicle>> {
        self.vehicles.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl VehicleRepository for MemoryRepository {
    fn fetch_vehicle(&self, id: VehicleId) -> Result<Option<Vehicle>, RepositoryError> {
        self.single_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.vehicles().iter().find(|v| v.id == Some(id)).cloned())
    }

    fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, RepositoryError> {
        self.collection_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.vehicles().clone())
    }
}

impl VehicleWriter for MemoryRepository {
    fn create_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle, RepositoryError> {
        let mut vehicles = self.vehicles();
        let next_id = vehicles.iter().filter_map(|v| v.id).max().unwrap_or(0) + 1;
        let created = vehicle.clone().with_id(next_id);
        vehicles.push(created.clone());
        Ok(created)
    }

    fn update_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle, RepositoryError> {
        let id = vehicle.id.ok_or(RepositoryError::MissingId)?;
        let mut vehicles = self.vehicles();
        let slot = vehicles
            .iter_mut()
            .find(|v| v.id == Some(id))
            .ok_or(RepositoryError::NotFound { id })?;
        *slot = vehicle.clone();
        Ok(vehicle.clone())
    }

    fn delete_vehicle(&self, id: VehicleId) -> Result<(), RepositoryError> {
        let mut vehicles = self.vehicles();
        let before = vehicles.len();
        vehicles.retain(|v| v.id != Some(id));
        if vehicles.len() == before {
            return Err(RepositoryError::NotFound { id });
        }
        Ok(())
    }
}

/// Repository whose every operation fails with the configured error.
#[derive(Debug, Clone)]
pub struct FailingRepository {
    error: RepositoryError,
}

impl FailingRepository {
    /// Create a repository that always returns `error`.
    #[must_use]
    pub const fn new(error: RepositoryError) -> Self {
        Self { error }
    }
}

impl VehicleRepository for FailingRepository {
    fn fetch_vehicle(&self, _id: VehicleId) -> Result<Option<Vehicle>, RepositoryError> {
        Err(self.error.clone())
    }

    fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, RepositoryError> {
        Err(self.error.clone())
    }
}

impl VehicleWriter for FailingRepository {
    fn create_vehicle(&self, _vehicle: &Vehicle) -> Result<Vehicle, RepositoryError> {
        Err(self.error.clone())
    }

    fn update_vehicle(&self, _vehicle: &Vehicle) -> Result<Vehicle, RepositoryError> {
        Err(self.error.clone())
    }

    fn delete_vehicle(&self, _id: VehicleId) -> Result<(), RepositoryError> {
        Err(self.error.clone())
    }
}

/// Build a stored vehicle at the given latitude and longitude.
#[must_use]
pub fn vehicle_at(id: VehicleId, latitude: f64, longitude: f64) -> Vehicle {
    Vehicle::new(
        format!("vehicle-{id}"),
        "test",
        2020,
        "grey",
        10_000,
        Coord {
            x: longitude,
            y: latitude,
        },
    )
    .with_id(id)
}
