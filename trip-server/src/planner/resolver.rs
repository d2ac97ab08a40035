//! Resolves one leg of a trip to its fastest route.

use tracing::debug;

use crate::directions::DirectionsProvider;
use crate::domain::{Leg, ResolvedWaypoint, Route};

use super::config::PlannerConfig;
use super::error::PlanError;

/// Pick the candidate with the smallest expected duration.
///
/// On ties the first minimal candidate in provider order wins. Candidates
/// with a non-finite duration are ignored. Returns `None` if nothing is
/// left to choose from.
pub fn select_fastest(routes: Vec<Route>) -> Option<Route> {
    let mut best: Option<Route> = None;
    for route in routes {
        if !route.expected_duration.is_finite() {
            continue;
        }
        match &best {
            Some(b) if route.expected_duration >= b.expected_duration => {}
            _ => best = Some(route),
        }
    }
    best
}

/// Turns an ordered pair of waypoints into a routed leg.
pub struct LegResolver<'a, P: ?Sized> {
    provider: &'a P,
    config: &'a PlannerConfig,
}

impl<P: ?Sized> Clone for LegResolver<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: ?Sized> Copy for LegResolver<'_, P> {}

impl<'a, P: DirectionsProvider + ?Sized> LegResolver<'a, P> {
    /// Create a new resolver.
    pub fn new(provider: &'a P, config: &'a PlannerConfig) -> Self {
        Self { provider, config }
    }

    /// Request routes from `origin` to `destination` and keep the fastest.
    ///
    /// A provider error or an empty candidate list is reported as
    /// `DirectionsUnavailable` with leg index 0; callers that know the
    /// position of the leg rewrite it with [`PlanError::at_leg`].
    pub async fn resolve_leg(
        &self,
        origin: &ResolvedWaypoint,
        destination: &ResolvedWaypoint,
    ) -> Result<Leg, PlanError> {
        let request = self.config.request(origin.point, destination.point);

        let candidates = self
            .provider
            .route(request)
            .await
            .map_err(|e| PlanError::directions_unavailable(0, e.to_string()))?;

        let candidate_count = candidates.len();
        let route = select_fastest(candidates)
            .ok_or_else(|| PlanError::directions_unavailable(0, "no candidate routes"))?;

        debug!(
            from = %origin.address,
            to = %destination.address,
            candidates = candidate_count,
            duration = route.expected_duration,
            "resolved leg"
        );

        Ok(Leg::new(origin.clone(), destination.clone(), route))
    }
}
