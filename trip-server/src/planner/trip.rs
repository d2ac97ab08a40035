//! Trip submission.

use std::sync::Arc;

use tracing::info;

use crate::directions::DirectionsProvider;
use crate::domain::{Itinerary, ResolvedWaypoint, WaypointStore};

use super::aggregator::ItineraryAggregator;
use super::config::PlannerConfig;
use super::error::PlanError;
use super::resolver::LegResolver;

/// Plan the round trip described by `store`.
///
/// The closed sequence is snapshotted before any request is made, so later
/// edits to the store do not affect this run. A fresh aggregator is used
/// for every submission.
pub async fn submit_trip<P: DirectionsProvider + ?Sized>(
    store: &WaypointStore,
    resolver: LegResolver<'_, P>,
) -> Result<Itinerary, PlanError> {
    if !store.is_ready_for_trip() {
        return Err(PlanError::InsufficientWaypoints);
    }

    let sequence = store.closed_round_trip()?;
    resolve_sequence(&sequence, resolver).await
}

async fn resolve_sequence<P: DirectionsProvider + ?Sized>(
    sequence: &[ResolvedWaypoint],
    resolver: LegResolver<'_, P>,
) -> Result<Itinerary, PlanError> {
    let mut aggregator = ItineraryAggregator::new(resolver);
    let itinerary = aggregator.resolve(sequence).await?;

    info!(
        legs = itinerary.leg_count(),
        total_duration = itinerary.total_duration(),
        "trip planned"
    );

    Ok(itinerary)
}

/// A directions provider bundled with its planner configuration.
///
/// Cheap to clone; the web layer shares one instance across requests.
#[derive(Clone)]
pub struct TripPlanner {
    provider: Arc<dyn DirectionsProvider>,
    config: PlannerConfig,
}

impl TripPlanner {
    /// Create a new planner.
    pub fn new(provider: Arc<dyn DirectionsProvider>, config: PlannerConfig) -> Self {
        Self { provider, config }
    }

    /// A leg resolver borrowing this planner's provider and configuration.
    pub fn resolver(&self) -> LegResolver<'_, dyn DirectionsProvider> {
        LegResolver::new(self.provider.as_ref(), &self.config)
    }

    /// Plan the round trip described by `store`.
    pub async fn plan(&self, store: &WaypointStore) -> Result<Itinerary, PlanError> {
        submit_trip(store, self.resolver()).await
    }

    /// Plan an explicit closed sequence of waypoints.
    pub async fn plan_sequence(
        &self,
        sequence: &[ResolvedWaypoint],
    ) -> Result<Itinerary, PlanError> {
        resolve_sequence(sequence, self.resolver()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directions::MockDirectionsProvider;
    use crate::domain::{Coordinate, Route};

    fn point(lat: f64) -> Coordinate {
        Coordinate::new(lat, -93.0).unwrap()
    }

    #[tokio::test]
    async fn unready_store_makes_no_requests() {
        let mock = Arc::new(MockDirectionsProvider::new());
        let planner = TripPlanner::new(mock.clone(), PlannerConfig::default());

        let mut store = WaypointStore::new();
        store.update(1, "B", point(2.0)).unwrap();

        assert_eq!(planner.plan(&store).await, Err(PlanError::InsufficientWaypoints));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn plans_two_leg_round_trip() {
        let (a, b) = (point(1.0), point(2.0));
        let mock = Arc::new(
            MockDirectionsProvider::new()
                .with_routes(a, b, vec![Route::summary(100.0, 1000.0)])
                .with_routes(b, a, vec![Route::summary(120.0, 1100.0)]),
        );
        let planner = TripPlanner::new(mock.clone(), PlannerConfig::default());

        let mut store = WaypointStore::new();
        store.update(0, "A", a).unwrap();
        store.update(1, "B", b).unwrap();

        let itinerary = planner.plan(&store).await.unwrap();
        assert_eq!(itinerary.leg_count(), 2);
        assert_eq!(itinerary.total_duration(), 220.0);
        assert!(itinerary.is_round_trip());
    }

    #[tokio::test]
    async fn plan_sequence_rejects_short_sequence() {
        let planner = TripPlanner::new(
            Arc::new(MockDirectionsProvider::new()),
            PlannerConfig::default(),
        );
        let only = [ResolvedWaypoint::new("A", point(1.0))];
        assert_eq!(
            planner.plan_sequence(&only).await,
            Err(PlanError::InsufficientWaypoints)
        );
    }
}
