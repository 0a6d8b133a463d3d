//! Attribute filters over the vehicle collection.

use crate::{RepositoryError, Vehicle, VehicleRepository};

/// Match vehicles on any combination of their attributes.
///
/// Each field left as `None` matches every vehicle. Set fields must equal the
/// vehicle's value exactly, coordinates included.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fleetgeo_core::{Vehicle, VehicleFilter};
///
/// let filter = VehicleFilter::default().with_color("red").with_year(2020);
/// let red = Vehicle::new("a", "m", 2020, "red", 1, Coord { x: 0.0, y: 0.0 });
/// let blue = Vehicle::new("b", "m", 2020, "blue", 1, Coord { x: 0.0, y: 0.0 });
///
/// assert!(filter.matches(&red));
/// assert!(!filter.matches(&blue));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleFilter {
    pub name: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub price: Option<u64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl VehicleFilter {
    /// Require an exact name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Require an exact model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Require a model year.
    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Require an exact colour.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Require a price.
    #[must_use]
    pub fn with_price(mut self, price: u64) -> Self {
        self.price = Some(price);
        self
    }

    /// Require a latitude.
    #[must_use]
    pub fn with_latitude(mut self, latitude: f64) -> Self {
        self.latitude = Some(latitude);
        self
    }

    /// Require a longitude.
    #[must_use]
    pub fn with_longitude(mut self, longitude: f64) -> Self {
        self.longitude = Some(longitude);
        self
    }

    /// `true` when no attribute is constrained.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.model.is_none()
            && self.year.is_none()
            && self.color.is_none()
            && self.price.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
    }

    /// Whether `vehicle` satisfies every constrained attribute.
    #[must_use]
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        field_matches(self.name.as_deref(), vehicle.name.as_str())
            && field_matches(self.model.as_deref(), vehicle.model.as_str())
            && field_matches(self.year, vehicle.year)
            && field_matches(self.color.as_deref(), vehicle.color.as_str())
            && field_matches(self.price, vehicle.price)
            && field_matches(self.latitude, vehicle.latitude())
            && field_matches(self.longitude, vehicle.longitude())
    }
}

fn field_matches<T: PartialEq>(expected: Option<T>, actual: T) -> bool {
    expected.is_none_or(|value| value == actual)
}

/// Fetch every vehicle and keep those matching `filter`, in fetch order.
pub fn filter_vehicles<R>(
    repository: &R,
    filter: &VehicleFilter,
) -> Result<Vec<Vehicle>, RepositoryError>
where
    R: VehicleRepository + ?Sized,
{
    let vehicles = repository.fetch_vehicles()?;
    Ok(vehicles
        .into_iter()
        .filter(|vehicle| filter.matches(vehicle))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingRepository, MemoryRepository};
    use geo::Coord;
    use rstest::{fixture, rstest};

    #[fixture]
    fn repository() -> MemoryRepository {
        MemoryRepository::with_vehicles([
            Vehicle::new("Civic", "EX", 2019, "blue", 18_500, Coord { x: -0.1, y: 51.5 })
                .with_id(1),
            Vehicle::new("Golf", "GTI", 2021, "red", 30_000, Coord { x: 2.35, y: 48.85 })
                .with_id(2),
            Vehicle::new("Civic", "Type R", 2021, "red", 42_000, Coord { x: -3.7, y: 40.4 })
                .with_id(3),
        ])
    }

    fn ids(vehicles: &[Vehicle]) -> Vec<Option<u64>> {
        vehicles.iter().map(|v| v.id).collect()
    }

    #[rstest]
    fn empty_filter_keeps_everything_in_order(repository: MemoryRepository) {
        let filter = VehicleFilter::default();
        assert!(filter.is_empty());
        let found = filter_vehicles(&repository, &filter).expect("memory fetch succeeds");
        assert_eq!(ids(&found), vec![Some(1), Some(2), Some(3)]);
    }

    #[rstest]
    #[case(VehicleFilter::default().with_name("Civic"), vec![Some(1), Some(3)])]
    #[case(VehicleFilter::default().with_color("red"), vec![Some(2), Some(3)])]
    #[case(VehicleFilter::default().with_color("red").with_year(2021).with_name("Civic"), vec![Some(3)])]
    #[case(VehicleFilter::default().with_model("GTI").with_price(30_000), vec![Some(2)])]
    #[case(VehicleFilter::default().with_latitude(51.5).with_longitude(-0.1), vec![Some(1)])]
    #[case(VehicleFilter::default().with_year(1999), vec![])]
    fn filters_on_every_attribute(
        repository: MemoryRepository,
        #[case] filter: VehicleFilter,
        #[case] expected: Vec<Option<u64>>,
    ) {
        let found = filter_vehicles(&repository, &filter).expect("memory fetch succeeds");
        assert_eq!(ids(&found), expected);
    }

    #[rstest]
    fn fetch_errors_propagate() {
        let repository = FailingRepository::new(RepositoryError::ParseError {
            message: "unexpected end of input".to_owned(),
        });
        let err = filter_vehicles(&repository, &VehicleFilter::default())
            .expect_err("fetch failure should propagate");
        assert!(matches!(err, RepositoryError::ParseError { .. }));
    }
}
