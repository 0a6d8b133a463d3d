//! `VehicleRepository` backed by the inventory service's REST API.
//!
//! | Operation        | Request                       |
//! |------------------|-------------------------------|
//! | `fetch_vehicles` | `GET {base}/vehicles`         |
//! | `fetch_vehicle`  | `GET {base}/vehicles/{id}`    |
//! | `create_vehicle` | `POST {base}/vehicles`        |
//! | `update_vehicle` | `PUT {base}/vehicles/{id}`    |
//! | `delete_vehicle` | `DELETE {base}/vehicles/{id}` |
//!
//! A `404` on a single-vehicle read is absence, not an error. A `400` on a
//! write is reported as [`RepositoryError::BadRequest`] carrying the body the
//! service sent back.

use std::future::Future;
use std::time::Duration;

use fleetgeo_core::{RepositoryError, Vehicle, VehicleId, VehicleRepository, VehicleWriter};
use log::{debug, warn};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::wire::VehicleRecord;

/// Error type for [`HttpVehicleRepository`] construction failures.
#[derive(Debug, Error)]
pub enum RepositoryBuildError {
    /// The configured base URL could not be parsed.
    #[error("invalid base URL {base_url:?}: {source}")]
    InvalidBaseUrl {
        /// URL as configured.
        base_url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default user agent for inventory requests.
pub const DEFAULT_USER_AGENT: &str = "fleetgeo/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Path segment of the vehicle collection.
const VEHICLES_PATH: &str = "vehicles";

/// Configuration for [`HttpVehicleRepository`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpVehicleRepositoryConfig {
    /// Base URL of the inventory service (e.g., `"http://localhost:8000"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpVehicleRepositoryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpVehicleRepositoryConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// How a response status is interpreted for the request that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusOutcome {
    /// 2xx.
    Success,
    /// 404 on a request addressing a single vehicle.
    Missing,
    /// 400 on a request carrying a vehicle body.
    Rejected,
    /// Anything else.
    Failed,
}

fn status_outcome(method: &Method, status: StatusCode) -> StatusOutcome {
    if status.is_success() {
        return StatusOutcome::Success;
    }
    let carries_body = *method == Method::POST || *method == Method::PUT;
    match status {
        StatusCode::NOT_FOUND if *method != Method::POST => StatusOutcome::Missing,
        StatusCode::BAD_REQUEST if carries_body => StatusOutcome::Rejected,
        _ => StatusOutcome::Failed,
    }
}

/// Vehicle repository speaking JSON over HTTP.
///
/// The repository owns a current-thread Tokio runtime that is reused across
/// calls. When called from inside a multi-threaded Tokio runtime it borrows
/// that runtime's handle through [`tokio::task::block_in_place`] instead.
/// A `current_thread` runtime cannot block in place, so the request is driven
/// by the repository's own runtime on a scoped helper thread while the
/// caller's thread waits for it.
pub struct HttpVehicleRepository {
    client: Client,
    config: HttpVehicleRepositoryConfig,
    base_url: String,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpVehicleRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpVehicleRepository")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl HttpVehicleRepository {
    /// Create a repository with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, RepositoryBuildError> {
        Self::with_config(HttpVehicleRepositoryConfig::new(base_url))
    }

    /// Create a repository with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(config: HttpVehicleRepositoryConfig) -> Result<Self, RepositoryBuildError> {
        Url::parse(&config.base_url).map_err(|source| RepositoryBuildError::InvalidBaseUrl {
            base_url: config.base_url.clone(),
            source,
        })?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(RepositoryBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(RepositoryBuildError::Runtime)?;
        let base_url = config.base_url.trim_end_matches('/').to_owned();
        Ok(Self {
            client,
            config,
            base_url,
            runtime,
        })
    }

    /// The configuration this repository was built with.
    #[must_use]
    pub const fn config(&self) -> &HttpVehicleRepositoryConfig {
        &self.config
    }

    fn collection_url(&self) -> String {
        format!("{}/{VEHICLES_PATH}", self.base_url)
    }

    fn vehicle_url(&self, id: VehicleId) -> String {
        format!("{}/{VEHICLES_PATH}/{id}", self.base_url)
    }

    /// Run `future` to completion from synchronous code.
    ///
    /// `url` only labels the error reported when the helper thread used under
    /// a `current_thread` runtime dies before producing a result.
    fn block_on<T, F>(&self, url: &str, future: F) -> Result<T, RepositoryError>
    where
        T: Send,
        F: Future<Output = Result<T, RepositoryError>> + Send,
    {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            // Runtime::block_on panics on a thread already driving a runtime.
            Ok(_) => std::thread::scope(|scope| {
                scope
                    .spawn(|| self.runtime.block_on(future))
                    .join()
                    .unwrap_or_else(|_| {
                        Err(RepositoryError::NetworkError {
                            url: url.to_owned(),
                            message: "request thread panicked".to_owned(),
                        })
                    })
            }),
            Err(_) => self.runtime.block_on(future),
        }
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&VehicleRecord>,
    ) -> Result<Response, RepositoryError> {
        debug!("{method} {url}");
        let mut request = self.client.request(method, url);
        if let Some(record) = body {
            request = request.json(record);
        }
        request
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RepositoryError> {
        response
            .json()
            .await
            .map_err(|err| RepositoryError::ParseError {
                message: err.to_string(),
            })
    }

    /// Convert a reqwest error to a `RepositoryError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> RepositoryError {
        if error.is_timeout() {
            return RepositoryError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        RepositoryError::NetworkError {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    async fn unexpected_status(url: &str, response: Response) -> RepositoryError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = if body.is_empty() {
            status.canonical_reason().unwrap_or_default().to_owned()
        } else {
            body
        };
        warn!("request to {url} failed with status {status}: {message}");
        RepositoryError::HttpError {
            url: url.to_owned(),
            status: status.as_u16(),
            message,
        }
    }

    async fn rejected(url: &str, response: Response) -> RepositoryError {
        let message = response.text().await.unwrap_or_default();
        warn!("inventory service rejected request to {url}: {message}");
        RepositoryError::BadRequest { message }
    }

    async fn fetch_vehicle_async(&self, id: VehicleId) -> Result<Option<Vehicle>, RepositoryError> {
        let url = self.vehicle_url(id);
        let response = self.send(Method::GET, &url, None).await?;
        match status_outcome(&Method::GET, response.status()) {
            StatusOutcome::Success => {
                let record: VehicleRecord = Self::decode(response).await?;
                Ok(Some(record.into()))
            }
            StatusOutcome::Missing => {
                debug!("vehicle {id} not found at {url}");
                Ok(None)
            }
            StatusOutcome::Rejected | StatusOutcome::Failed => {
                Err(Self::unexpected_status(&url, response).await)
            }
        }
    }

    async fn fetch_vehicles_async(&self) -> Result<Vec<Vehicle>, RepositoryError> {
        let url = self.collection_url();
        let response = self.send(Method::GET, &url, None).await?;
        match status_outcome(&Method::GET, response.status()) {
            StatusOutcome::Success => {
                let records: Vec<VehicleRecord> = Self::decode(response).await?;
                Ok(records.into_iter().map(Vehicle::from).collect())
            }
            StatusOutcome::Missing | StatusOutcome::Rejected | StatusOutcome::Failed => {
                Err(Self::unexpected_status(&url, response).await)
            }
        }
    }

    async fn create_vehicle_async(&self, vehicle: &Vehicle) -> Result<Vehicle, RepositoryError> {
        let url = self.collection_url();
        let record = VehicleRecord::from(vehicle);
        let response = self.send(Method::POST, &url, Some(&record)).await?;
        match status_outcome(&Method::POST, response.status()) {
            StatusOutcome::Success => {
                let created: VehicleRecord = Self::decode(response).await?;
                Ok(created.into())
            }
            StatusOutcome::Rejected => Err(Self::rejected(&url, response).await),
            StatusOutcome::Missing | StatusOutcome::Failed => {
                Err(Self::unexpected_status(&url, response).await)
            }
        }
    }

    async fn update_vehicle_async(&self, vehicle: &Vehicle) -> Result<Vehicle, RepositoryError> {
        let id = vehicle.id.ok_or(RepositoryError::MissingId)?;
        let url = self.vehicle_url(id);
        let record = VehicleRecord::from(vehicle);
        let response = self.send(Method::PUT, &url, Some(&record)).await?;
        match status_outcome(&Method::PUT, response.status()) {
            StatusOutcome::Success => {
                let updated: VehicleRecord = Self::decode(response).await?;
                Ok(updated.into())
            }
            StatusOutcome::Rejected => Err(Self::rejected(&url, response).await),
            StatusOutcome::Missing => Err(RepositoryError::NotFound { id }),
            StatusOutcome::Failed => Err(Self::unexpected_status(&url, response).await),
        }
    }

    async fn delete_vehicle_async(&self, id: VehicleId) -> Result<(), RepositoryError> {
        let url = self.vehicle_url(id);
        let response = self.send(Method::DELETE, &url, None).await?;
        match status_outcome(&Method::DELETE, response.status()) {
            StatusOutcome::Success => Ok(()),
            StatusOutcome::Missing => Err(RepositoryError::NotFound { id }),
            StatusOutcome::Rejected | StatusOutcome::Failed => {
                Err(Self::unexpected_status(&url, response).await)
            }
        }
    }
}

impl VehicleRepository for HttpVehicleRepository {
    fn fetch_vehicle(&self, id: VehicleId) -> Result<Option<Vehicle>, RepositoryError> {
        self.block_on(&self.vehicle_url(id), self.fetch_vehicle_async(id))
    }

    fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, RepositoryError> {
        self.block_on(&self.collection_url(), self.fetch_vehicles_async())
    }
}

impl VehicleWriter for HttpVehicleRepository {
    fn create_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle, RepositoryError> {
        self.block_on(&self.collection_url(), self.create_vehicle_async(vehicle))
    }

    fn update_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle, RepositoryError> {
        let url = vehicle
            .id
            .map_or_else(|| self.collection_url(), |id| self.vehicle_url(id));
        self.block_on(&url, self.update_vehicle_async(vehicle))
    }

    fn delete_vehicle(&self, id: VehicleId) -> Result<(), RepositoryError> {
        self.block_on(&self.vehicle_url(id), self.delete_vehicle_async(id))
    }
}
