//! Distance and nearest-vehicle queries over a [`VehicleRepository`].
//!
//! Every query fetches what it needs from the repository, computes great-circle
//! distances and returns. Nothing is cached between calls and no spatial index
//! is built: the nearest-vehicle search is a single linear scan over the full
//! collection.
//!
//! Lookups that find nothing are reported as absence rather than as errors.
//! [`GeoQueryEngine::distance`] and [`GeoQueryEngine::nearest_vehicle`] return
//! `Option`; the `try_` variants return a [`QueryMiss`] describing why nothing
//! was found, for callers that need to tell the cases apart.

use log::warn;
use thiserror::Error;

use crate::{RepositoryError, Vehicle, VehicleId, VehicleRepository};

/// Why a query produced no result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryMiss {
    /// The repository has no vehicle with this identifier.
    #[error("vehicle with id {id} not found")]
    NotFound {
        /// Identifier that could not be resolved.
        id: VehicleId,
    },
    /// Fetching from the repository failed.
    #[error("failed to fetch vehicles: {0}")]
    Fetch(#[from] RepositoryError),
    /// The target resolved but no other vehicle exists to compare against.
    #[error("no vehicle other than {id} to compare against")]
    NoCandidates {
        /// Identifier of the target vehicle.
        id: VehicleId,
    },
}

/// The closest vehicle to a target and how far away it is.
#[derive(Debug, Clone, PartialEq)]
pub struct Nearest {
    /// The winning vehicle.
    pub vehicle: Vehicle,
    /// Great-circle distance to the target in metres.
    pub distance_metres: f64,
}

/// Find the candidate closest to `target`.
///
/// Candidates sharing `target.id` are skipped, including the target itself.
/// The running minimum is only replaced on a strictly smaller distance, so the
/// first candidate wins a tie. A candidate whose distance is NaN never wins.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fleetgeo_core::{Vehicle, nearest_to};
///
/// let target = Vehicle::new("t", "m", 2020, "red", 1, Coord { x: 0.0, y: 0.0 }).with_id(1);
/// let near = Vehicle::new("n", "m", 2020, "red", 1, Coord { x: 0.1, y: 0.0 }).with_id(2);
/// let far = Vehicle::new("f", "m", 2020, "red", 1, Coord { x: 5.0, y: 0.0 }).with_id(3);
///
/// let fleet = [target.clone(), far, near.clone()];
/// let (winner, _) = nearest_to(&target, &fleet).expect("two candidates");
/// assert_eq!(winner, &near);
/// ```
pub fn nearest_to<'a, I>(target: &Vehicle, candidates: I) -> Option<(&'a Vehicle, f64)>
where
    I: IntoIterator<Item = &'a Vehicle>,
{
    let mut best: Option<(&'a Vehicle, f64)> = None;
    for candidate in candidates {
        if candidate.id == target.id {
            continue;
        }
        let distance = target.distance_to(candidate);
        let closer = best.is_none_or(|(_, min)| distance < min);
        if closer && !distance.is_nan() {
            best = Some((candidate, distance));
        }
    }
    best
}

/// Answers geographic questions about the vehicles in a repository.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fleetgeo_core::{GeoQueryEngine, Vehicle, test_support::MemoryRepository};
///
/// let repository = MemoryRepository::with_vehicles([
///     Vehicle::new("a", "m", 2020, "red", 1, Coord { x: 0.0, y: 0.0 }).with_id(1),
///     Vehicle::new("b", "m", 2020, "red", 1, Coord { x: 0.0, y: 1.0 }).with_id(2),
/// ]);
/// let engine = GeoQueryEngine::new(repository);
///
/// assert_eq!(engine.nearest_vehicle(1).and_then(|v| v.id), Some(2));
/// assert!(engine.distance(1, 2).is_some_and(|m| m > 111_000.0));
/// assert_eq!(engine.nearest_vehicle(42), None);
/// ```
#[derive(Debug, Clone)]
pub struct GeoQueryEngine<R> {
    repository: R,
}

impl<R: VehicleRepository> GeoQueryEngine<R> {
    /// Create an engine reading from `repository`.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Borrow the underlying repository.
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    /// Consume the engine and return its repository.
    pub fn into_inner(self) -> R {
        self.repository
    }

    /// Great-circle distance in metres between two vehicles.
    ///
    /// Returns `None` when either vehicle cannot be resolved.
    pub fn distance(&self, first: VehicleId, second: VehicleId) -> Option<f64> {
        self.try_distance(first, second).ok()
    }

    /// Like [`Self::distance`] but reports why no distance was produced.
    ///
    /// Vehicles are resolved in argument order and the second is not fetched
    /// when the first cannot be resolved. A miss on the first vehicle costs
    /// one repository read rather than two; the result is the same as
    /// fetching both up front.
    pub fn try_distance(&self, first: VehicleId, second: VehicleId) -> Result<f64, QueryMiss> {
        let from = self.resolve(first)?;
        let to = self.resolve(second)?;
        Ok(from.distance_to(&to))
    }

    /// The vehicle closest to `id`, excluding the vehicle itself.
    ///
    /// Returns `None` when the target cannot be resolved, when fetching the
    /// collection fails, or when no other vehicle exists.
    pub fn nearest_vehicle(&self, id: VehicleId) -> Option<Vehicle> {
        self.try_nearest_vehicle(id)
            .ok()
            .map(|nearest| nearest.vehicle)
    }

    /// Like [`Self::nearest_vehicle`] but reports why nothing was found and
    /// includes the winning distance.
    ///
    /// The collection is only fetched once the target has resolved.
    pub fn try_nearest_vehicle(&self, id: VehicleId) -> Result<Nearest, QueryMiss> {
        let target = self.resolve(id)?;
        let vehicles = self.repository.fetch_vehicles().map_err(|err| {
            warn!("failed to fetch vehicle collection for nearest search around {id}: {err}");
            QueryMiss::Fetch(err)
        })?;
        nearest_to(&target, &vehicles)
            .map(|(vehicle, distance_metres)| Nearest {
                vehicle: vehicle.clone(),
                distance_metres,
            })
            .ok_or(QueryMiss::NoCandidates { id })
    }

    fn resolve(&self, id: VehicleId) -> Result<Vehicle, QueryMiss> {
        match self.repository.fetch_vehicle(id) {
            Ok(Some(vehicle)) => Ok(vehicle),
            Ok(None) => Err(QueryMiss::NotFound { id }),
            Err(err) => {
                warn!("failed to fetch vehicle {id}: {err}");
                Err(QueryMiss::Fetch(err))
            }
        }
    }
}
