//! In-memory geocoder for tests and offline development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::BoxFuture;

use crate::domain::Coordinate;

use super::error::GeocodingError;
use super::placemark::Placemark;
use super::provider::{GeocodingProvider, normalize_query};

/// Geocoder backed by fixed lookup tables.
///
/// Forward lookups are keyed by normalised query text. Reverse lookups
/// return the placemark registered for the exact point, or the nearest
/// registered placemark if no exact match exists.
#[derive(Debug, Default)]
pub struct StaticGeocoder {
    places: HashMap<String, Vec<Placemark>>,
    reverse: Vec<Placemark>,
    calls: AtomicUsize,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register candidates for a query. Every candidate also becomes
    /// available to reverse lookups.
    pub fn with_place(mut self, query: &str, candidates: Vec<Placemark>) -> Self {
        self.reverse.extend(candidates.iter().cloned());
        self.places.insert(normalize_query(query), candidates);
        self
    }

    /// Number of lookups served, forward and reverse.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn lookup(&self, query: &str) -> Result<Vec<Placemark>, GeocodingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let key = normalize_query(query);
        if key.is_empty() {
            return Err(GeocodingError::EmptyQuery);
        }
        match self.places.get(&key) {
            Some(found) if !found.is_empty() => Ok(found.clone()),
            _ => Err(GeocodingError::NoMatches),
        }
    }

    fn nearest(&self, point: Coordinate) -> Result<Vec<Placemark>, GeocodingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        self.reverse
            .iter()
            .min_by(|a, b| {
                squared_offset(a.coordinate, point).total_cmp(&squared_offset(b.coordinate, point))
            })
            .map(|p| vec![p.clone()])
            .ok_or(GeocodingError::NoMatches)
    }
}

fn squared_offset(a: Coordinate, b: Coordinate) -> f64 {
    let dlat = a.lat() - b.lat();
    let dlon = a.lon() - b.lon();
    dlat * dlat + dlon * dlon
}

impl GeocodingProvider for StaticGeocoder {
    fn geocode<'a>(
        &'a self,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Placemark>, GeocodingError>> {
        Box::pin(async move { self.lookup(query) })
    }

    fn reverse(&self, point: Coordinate) -> BoxFuture<'_, Result<Vec<Placemark>, GeocodingError>> {
        Box::pin(async move { self.nearest(point) })
    }
}
