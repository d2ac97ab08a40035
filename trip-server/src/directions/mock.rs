//! Mock directions provider for testing without a routing server.
//!
//! Routes are keyed by (origin, destination) and can be loaded from JSON
//! fixture files or registered in memory. The mock records every request
//! and the peak number of requests in flight, which lets tests observe
//! ordering and concurrency.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::future::BoxFuture;
use serde::Deserialize;

use crate::domain::{Coordinate, Route};

use super::convert::convert_route_response;
use super::error::DirectionsError;
use super::provider::{DirectionsProvider, DirectionsRequest};
use super::types::OsrmRouteResponse;

/// A fixture file: one OSRM response for one directed pair.
#[derive(Debug, Deserialize)]
struct RouteFixture {
    origin: Coordinate,
    destination: Coordinate,
    response: OsrmRouteResponse,
}

#[derive(Debug, Clone)]
enum MockOutcome {
    Routes(Vec<Route>),
    NoRoute,
    Unavailable(String),
}

#[derive(Debug, Clone)]
struct MockEntry {
    outcome: MockOutcome,
    delay: Duration,
}

/// Mock directions provider that serves canned routes.
#[derive(Debug, Default)]
pub struct MockDirectionsProvider {
    entries: HashMap<(Coordinate, Coordinate), MockEntry>,
    requests: Mutex<Vec<DirectionsRequest>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockDirectionsProvider {
    /// Create an empty mock. Every request fails with `NoRoute` until
    /// routes are registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load fixtures from every `.json` file in a directory.
    ///
    /// Each file holds `{"origin": .., "destination": .., "response": <OSRM route response>}`.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, DirectionsError> {
        let data_dir = data_dir.as_ref();
        let mut mock = Self::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            DirectionsError::NotConfigured(format!(
                "failed to read mock routes directory {}: {e}",
                data_dir.display()
            ))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                DirectionsError::NotConfigured(format!("failed to read directory entry: {e}"))
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let json = std::fs::read_to_string(&path).map_err(|e| {
                DirectionsError::NotConfigured(format!("failed to read {}: {e}", path.display()))
            })?;

            let fixture: RouteFixture =
                serde_json::from_str(&json).map_err(|e| DirectionsError::Json {
                    message: format!("{}: {e}", path.display()),
                    body: None,
                })?;

            let outcome = match convert_route_response(&fixture.response) {
                Ok(routes) => MockOutcome::Routes(routes),
                Err(DirectionsError::NoRoute) => MockOutcome::NoRoute,
                Err(e) => MockOutcome::Unavailable(e.to_string()),
            };

            mock.insert(fixture.origin, fixture.destination, outcome, Duration::ZERO);
        }

        if mock.entries.is_empty() {
            return Err(DirectionsError::NotConfigured(format!(
                "no mock route files found in {}",
                data_dir.display()
            )));
        }

        Ok(mock)
    }

    fn insert(
        &mut self,
        origin: Coordinate,
        destination: Coordinate,
        outcome: MockOutcome,
        delay: Duration,
    ) {
        self.entries
            .insert((origin, destination), MockEntry { outcome, delay });
    }

    /// Serve `routes` for the directed pair.
    pub fn with_routes(
        mut self,
        origin: Coordinate,
        destination: Coordinate,
        routes: Vec<Route>,
    ) -> Self {
        self.insert(origin, destination, MockOutcome::Routes(routes), Duration::ZERO);
        self
    }

    /// Serve `routes` for the directed pair after a delay.
    pub fn with_delayed_routes(
        mut self,
        origin: Coordinate,
        destination: Coordinate,
        routes: Vec<Route>,
        delay: Duration,
    ) -> Self {
        self.insert(origin, destination, MockOutcome::Routes(routes), delay);
        self
    }

    /// Fail the directed pair with an API error.
    pub fn with_failure(
        mut self,
        origin: Coordinate,
        destination: Coordinate,
        message: impl Into<String>,
    ) -> Self {
        self.insert(
            origin,
            destination,
            MockOutcome::Unavailable(message.into()),
            Duration::ZERO,
        );
        self
    }

    /// Number of directed pairs with a registered outcome.
    pub fn pair_count(&self) -> usize {
        self.entries.len()
    }

    /// All requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<DirectionsRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    /// Highest number of requests that were in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn serve(&self, request: DirectionsRequest) -> Result<Vec<Route>, DirectionsError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let entry = self
            .entries
            .get(&(request.origin, request.destination))
            .cloned();

        if let Some(delay) = entry.as_ref().map(|e| e.delay).filter(|d| !d.is_zero()) {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match entry.map(|e| e.outcome) {
            Some(MockOutcome::Routes(routes)) => Ok(routes),
            Some(MockOutcome::NoRoute) | None => Err(DirectionsError::NoRoute),
            Some(MockOutcome::Unavailable(message)) => {
                Err(DirectionsError::Api { status: 503, message })
            }
        }
    }
}

impl DirectionsProvider for MockDirectionsProvider {
    fn route(
        &self,
        request: DirectionsRequest,
    ) -> BoxFuture<'_, Result<Vec<Route>, DirectionsError>> {
        Box::pin(self.serve(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64) -> Coordinate {
        Coordinate::new(lat, -93.0).unwrap()
    }

    #[tokio::test]
    async fn serves_registered_routes() {
        let mock = MockDirectionsProvider::new().with_routes(
            point(1.0),
            point(2.0),
            vec![Route::summary(60.0, 1000.0)],
        );

        let routes = mock
            .route(DirectionsRequest::driving(point(1.0), point(2.0)))
            .await
            .unwrap();

        assert_eq!(routes.len(), 1);
        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.max_in_flight(), 1);
    }

    #[tokio::test]
    async fn pairs_are_directed() {
        let mock = MockDirectionsProvider::new().with_routes(
            point(1.0),
            point(2.0),
            vec![Route::summary(60.0, 1000.0)],
        );

        let result = mock
            .route(DirectionsRequest::driving(point(2.0), point(1.0)))
            .await;

        assert!(matches!(result, Err(DirectionsError::NoRoute)));
    }

    #[tokio::test]
    async fn failure_is_api_error() {
        let mock = MockDirectionsProvider::new().with_failure(point(1.0), point(2.0), "down");
        let result = mock
            .route(DirectionsRequest::driving(point(1.0), point(2.0)))
            .await;
        assert!(matches!(result, Err(DirectionsError::Api { status: 503, .. })));
    }

    #[tokio::test]
    async fn loads_fixture_directory() {
        let dir = tempfile::tempdir().unwrap();
        let fixture = r#"{
            "origin": {"lat": 41.5868, "lon": -93.625},
            "destination": {"lat": 44.0121, "lon": -92.4802},
            "response": {
                "code": "Ok",
                "routes": [
                    {"duration": 12000.0, "distance": 340000.0, "legs": []},
                    {"duration": 11000.0, "distance": 355000.0, "legs": []}
                ]
            }
        }"#;
        std::fs::write(dir.path().join("dsm_rst.json"), fixture).unwrap();
        std::fs::write(dir.path().join("README.txt"), "ignored").unwrap();

        let mock = MockDirectionsProvider::from_dir(dir.path()).unwrap();
        assert_eq!(mock.pair_count(), 1);

        let routes = mock
            .route(DirectionsRequest::driving(
                Coordinate::new(41.5868, -93.625).unwrap(),
                Coordinate::new(44.0121, -92.4802).unwrap(),
            ))
            .await
            .unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[1].expected_duration, 11000.0);
    }

    #[test]
    fn empty_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(MockDirectionsProvider::from_dir(dir.path()).is_err());
    }
}
