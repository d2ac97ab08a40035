//! Caching layer for geocoding responses.
//!
//! Forward lookups are cached by normalised query text, so "Des Moines"
//! and "  des moines " share an entry. Only successful lookups are cached;
//! errors such as `NoMatches` are always retried against the provider.
//! Reverse lookups and directions are never cached.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::Coordinate;
use crate::geocoding::{GeocodingError, GeocodingProvider, Placemark, normalize_query};

/// Cached geocoding entry.
type PlacemarkEntry = Arc<Vec<Placemark>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl CacheConfig {
    /// Set the TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the maximum number of entries.
    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 1000,
        }
    }
}

/// Geocoder with caching.
///
/// Wraps any `GeocodingProvider` and caches forward lookups.
pub struct CachedGeocoder<P> {
    inner: P,
    places: MokaCache<String, PlacemarkEntry>,
}

impl<P: GeocodingProvider> CachedGeocoder<P> {
    /// Create a new cached geocoder.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let places = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, places }
    }

    /// Forward lookup, using the cache if available.
    pub async fn lookup(&self, query: &str) -> Result<Vec<Placemark>, GeocodingError> {
        let key = normalize_query(query);
        if key.is_empty() {
            return Err(GeocodingError::EmptyQuery);
        }

        if let Some(cached) = self.places.get(&key).await {
            debug!(query = %key, "geocoding cache hit");
            return Ok(cached.as_ref().clone());
        }

        let placemarks = self.inner.geocode(query).await?;
        self.places
            .insert(key, Arc::new(placemarks.clone()))
            .await;

        Ok(placemarks)
    }

    /// Access the underlying provider for operations that bypass cache.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.places.invalidate_all();
    }
}

impl<P: GeocodingProvider> GeocodingProvider for CachedGeocoder<P> {
    fn geocode<'a>(
        &'a self,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Placemark>, GeocodingError>> {
        Box::pin(self.lookup(query))
    }

    fn reverse(&self, point: Coordinate) -> BoxFuture<'_, Result<Vec<Placemark>, GeocodingError>> {
        self.inner.reverse(point)
    }
}
