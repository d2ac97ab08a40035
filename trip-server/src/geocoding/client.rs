//! Nominatim geocoding HTTP client.

use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::Coordinate;

use super::error::GeocodingError;
use super::placemark::Placemark;
use super::provider::GeocodingProvider;
use super::types::{NominatimAddress, NominatimPlace, NominatimReverseResponse};

/// Default base URL (the public OpenStreetMap instance).
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Default User-Agent. The public instance rejects requests without one.
const DEFAULT_USER_AGENT: &str = concat!("trip-server/", env!("CARGO_PKG_VERSION"));

/// Default number of candidates per search.
const DEFAULT_LIMIT: u8 = 5;

/// Configuration for the Nominatim client.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL of the Nominatim server
    pub base_url: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Maximum candidates per search
    pub limit: u8,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl NominatimConfig {
    /// Create a config pointing at the given server.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            limit: DEFAULT_LIMIT,
            timeout_secs: 30,
        }
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the maximum number of candidates per search.
    pub fn with_limit(mut self, limit: u8) -> Self {
        self.limit = limit;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Nominatim client.
///
/// Requests are serialised through a single permit; the public instance
/// allows one request per second per client.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
    limit: u8,
    semaphore: Arc<Semaphore>,
}

impl NominatimClient {
    /// Create a new client with the given configuration.
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodingError> {
        let mut headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&config.user_agent).map_err(|_| {
            GeocodingError::NotConfigured("invalid User-Agent header value".to_string())
        })?;
        headers.insert(USER_AGENT, user_agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            limit: config.limit.max(1),
            semaphore: Arc::new(Semaphore::new(1)),
        })
    }

    async fn get_text(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<String, GeocodingError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| GeocodingError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "geocoding request");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodingError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        Ok(response.text().await?)
    }

    /// Search for places matching free-text input.
    pub async fn search(&self, query: &str) -> Result<Vec<Placemark>, GeocodingError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodingError::EmptyQuery);
        }

        let body = self
            .get_text(
                "/search",
                &[
                    ("q", query.to_string()),
                    ("format", "jsonv2".to_string()),
                    ("addressdetails", "1".to_string()),
                    ("limit", self.limit.to_string()),
                ],
            )
            .await?;

        let places: Vec<NominatimPlace> =
            serde_json::from_str(&body).map_err(|e| GeocodingError::Json {
                message: e.to_string(),
            })?;

        let placemarks: Vec<Placemark> = places.iter().filter_map(to_placemark).collect();
        if placemarks.is_empty() {
            return Err(GeocodingError::NoMatches);
        }
        Ok(placemarks)
    }

    /// Look up the address at a point.
    pub async fn lookup(&self, point: Coordinate) -> Result<Vec<Placemark>, GeocodingError> {
        let body = self
            .get_text(
                "/reverse",
                &[
                    ("lat", point.lat().to_string()),
                    ("lon", point.lon().to_string()),
                    ("format", "jsonv2".to_string()),
                    ("addressdetails", "1".to_string()),
                ],
            )
            .await?;

        let response: NominatimReverseResponse =
            serde_json::from_str(&body).map_err(|e| GeocodingError::Json {
                message: e.to_string(),
            })?;

        match response {
            NominatimReverseResponse::Place(place) => to_placemark(&place)
                .map(|p| vec![p])
                .ok_or(GeocodingError::NoMatches),
            NominatimReverseResponse::Error { error } => {
                debug!(%error, "reverse geocoding found nothing");
                Err(GeocodingError::NoMatches)
            }
        }
    }
}

impl GeocodingProvider for NominatimClient {
    fn geocode<'a>(
        &'a self,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Placemark>, GeocodingError>> {
        Box::pin(self.search(query))
    }

    fn reverse(&self, point: Coordinate) -> BoxFuture<'_, Result<Vec<Placemark>, GeocodingError>> {
        Box::pin(self.lookup(point))
    }
}

/// Convert a Nominatim result, dropping it if the coordinates are invalid.
pub fn to_placemark(place: &NominatimPlace) -> Option<Placemark> {
    let lat = place.lat.trim().parse::<f64>().ok()?;
    let lon = place.lon.trim().parse::<f64>().ok()?;
    let coordinate = Coordinate::new(lat, lon).ok()?;

    let mut lines = place
        .address
        .as_ref()
        .map(address_lines)
        .unwrap_or_default();
    if lines.is_empty() && !place.display_name.trim().is_empty() {
        lines.push(place.display_name.trim().to_string());
    }

    Some(Placemark::new(lines, coordinate))
}

/// Postal-style lines: street, "locality, state postcode", country.
pub fn address_lines(address: &NominatimAddress) -> Vec<String> {
    let mut lines = Vec::new();

    let street = match (address.house_number.as_deref(), address.road.as_deref()) {
        (Some(number), Some(road)) => Some(format!("{number} {road}")),
        (None, Some(road)) => Some(road.to_string()),
        _ => None,
    };
    lines.extend(street);

    let region = match (address.state.as_deref(), address.postcode.as_deref()) {
        (Some(state), Some(postcode)) => Some(format!("{state} {postcode}")),
        (Some(state), None) => Some(state.to_string()),
        (None, Some(postcode)) => Some(postcode.to_string()),
        (None, None) => None,
    };
    let place = address.locality().or(address.county.as_deref());
    match (place, region) {
        (Some(place), Some(region)) => lines.push(format!("{place}, {region}")),
        (Some(place), None) => lines.push(place.to_string()),
        (None, Some(region)) => lines.push(region),
        (None, None) => {}
    }

    lines.extend(address.country.clone());
    lines
}
