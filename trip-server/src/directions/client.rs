//! OSRM route API HTTP client.
//!
//! Provides async route queries against an OSRM server, requesting
//! alternates, turn-by-turn steps and full GeoJSON geometry.

use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Route, TransportMode};

use super::convert::convert_route_response;
use super::error::DirectionsError;
use super::provider::{DirectionsProvider, DirectionsRequest};
use super::types::OsrmRouteResponse;

/// Default base URL (the public OSRM demo server).
const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 2;

/// Path prefix of the route service.
pub const OSRM_ROUTE_API_PATH: &str = "/route/v1/";

/// Configuration for the OSRM client.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL of the OSRM server
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OsrmConfig {
    /// Create a config pointing at the given server.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// OSRM routing profile for a transport mode.
pub fn profile_for(mode: TransportMode) -> &'static str {
    match mode {
        TransportMode::Automobile => "driving",
        TransportMode::Walking => "foot",
    }
}

/// OSRM route API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl OsrmClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OsrmConfig) -> Result<Self, DirectionsError> {
        if config.max_concurrent == 0 {
            return Err(DirectionsError::NotConfigured(
                "max_concurrent must be at least 1".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Build the request URL for a route query.
    ///
    /// OSRM takes coordinates as `lon,lat` pairs separated by `;`.
    pub fn route_url(&self, request: &DirectionsRequest) -> String {
        let origin: geo_types::Point<f64> = request.origin.into();
        let destination: geo_types::Point<f64> = request.destination.into();

        format!(
            "{}{}{}/{},{};{},{}",
            self.base_url,
            OSRM_ROUTE_API_PATH,
            profile_for(request.mode),
            origin.x(),
            origin.y(),
            destination.x(),
            destination.y()
        )
    }

    /// Fetch candidate routes between two points.
    ///
    /// Candidates are returned in OSRM's order. The vector may be empty
    /// if every route was dropped during conversion.
    pub async fn get_routes(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<Route>, DirectionsError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| DirectionsError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = self.route_url(request);
        debug!(%url, "requesting routes");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("alternatives", request.alternatives.to_string()),
                ("steps", "true".to_string()),
                ("geometries", "geojson".to_string()),
                ("overview", "full".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DirectionsError::RateLimited);
        }

        let body = response.text().await?;

        // OSRM reports NoRoute and friends as a 400 with a JSON body, so
        // try to parse the body before treating the status as fatal.
        match serde_json::from_str::<OsrmRouteResponse>(&body) {
            Ok(parsed) => convert_route_response(&parsed),
            Err(_) if !status.is_success() => Err(DirectionsError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            }),
            Err(e) => Err(DirectionsError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            }),
        }
    }
}

impl DirectionsProvider for OsrmClient {
    fn route(
        &self,
        request: DirectionsRequest,
    ) -> BoxFuture<'_, Result<Vec<Route>, DirectionsError>> {
        Box::pin(async move { self.get_routes(&request).await })
    }
}
