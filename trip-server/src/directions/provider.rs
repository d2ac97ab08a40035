//! Directions provider abstraction.

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::domain::{Coordinate, Route, TransportMode};

use super::error::DirectionsError;

/// A request for routes between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionsRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    /// Ask for alternate routes, not just the provider's preferred one.
    pub alternatives: bool,
    pub mode: TransportMode,
}

impl DirectionsRequest {
    /// Driving request with alternates.
    pub fn driving(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            origin,
            destination,
            alternatives: true,
            mode: TransportMode::Automobile,
        }
    }
}

/// Source of candidate routes.
///
/// This abstraction allows the planner to be tested with mock data.
/// Implementations return candidates in their own preference order; an
/// empty vector means the provider found nothing usable.
pub trait DirectionsProvider: Send + Sync {
    fn route(&self, request: DirectionsRequest)
    -> BoxFuture<'_, Result<Vec<Route>, DirectionsError>>;
}

impl<P: DirectionsProvider + ?Sized> DirectionsProvider for Arc<P> {
    fn route(
        &self,
        request: DirectionsRequest,
    ) -> BoxFuture<'_, Result<Vec<Route>, DirectionsError>> {
        (**self).route(request)
    }
}
