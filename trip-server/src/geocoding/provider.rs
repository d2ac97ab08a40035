//! Geocoding provider abstraction.

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::domain::Coordinate;

use super::error::GeocodingError;
use super::placemark::Placemark;

/// Turns free-text addresses into candidate locations and back.
///
/// Both operations return at least one placemark on success. An empty
/// result is reported as `GeocodingError::NoMatches`.
pub trait GeocodingProvider: Send + Sync {
    /// Forward geocoding: address text to candidates, best match first.
    fn geocode<'a>(&'a self, query: &'a str)
    -> BoxFuture<'a, Result<Vec<Placemark>, GeocodingError>>;

    /// Reverse geocoding: a point to the addresses found there.
    fn reverse(&self, point: Coordinate) -> BoxFuture<'_, Result<Vec<Placemark>, GeocodingError>>;
}

impl<P: GeocodingProvider + ?Sized> GeocodingProvider for Arc<P> {
    fn geocode<'a>(
        &'a self,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Placemark>, GeocodingError>> {
        (**self).geocode(query)
    }

    fn reverse(&self, point: Coordinate) -> BoxFuture<'_, Result<Vec<Placemark>, GeocodingError>> {
        (**self).reverse(point)
    }
}

/// Canonical form of a query: trimmed, lowercased, inner whitespace
/// collapsed to single spaces.
pub fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize_query("  Des   Moines\tIA "), "des moines ia");
        assert_eq!(normalize_query("   "), "");
    }
}
