//! Sequential itinerary resolution.
//!
//! Legs are resolved strictly one after another: leg i+1 is requested only
//! once leg i has succeeded, so the provider sees requests in travel order
//! and durations are accumulated in leg order.

use std::fmt;

use tracing::{debug, warn};

use crate::directions::DirectionsProvider;
use crate::domain::{Itinerary, ResolvedWaypoint};

use super::error::PlanError;
use super::resolver::LegResolver;

/// Progress of an aggregator through a waypoint sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    /// Nothing requested yet.
    Idle,
    /// Waiting on the leg with this index.
    ResolvingLeg(usize),
    /// Every leg resolved.
    Complete,
    /// A leg failed; partial results were discarded.
    Failed,
}

impl fmt::Display for ResolutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionState::Idle => f.write_str("idle"),
            ResolutionState::ResolvingLeg(i) => write!(f, "resolving leg {i}"),
            ResolutionState::Complete => f.write_str("complete"),
            ResolutionState::Failed => f.write_str("failed"),
        }
    }
}

/// Drives a [`LegResolver`] over a closed waypoint sequence.
///
/// No timeout and no retry: the first failing leg ends the run.
pub struct ItineraryAggregator<'a, P: ?Sized> {
    resolver: LegResolver<'a, P>,
    state: ResolutionState,
}

impl<'a, P: DirectionsProvider + ?Sized> ItineraryAggregator<'a, P> {
    /// Create an idle aggregator.
    pub fn new(resolver: LegResolver<'a, P>) -> Self {
        Self {
            resolver,
            state: ResolutionState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> ResolutionState {
        self.state
    }

    fn transition(&mut self, next: ResolutionState) {
        debug!(from = %self.state, to = %next, "aggregator state");
        self.state = next;
    }

    /// Resolve every consecutive pair of `sequence` into a leg.
    ///
    /// # Errors
    ///
    /// - `InsufficientWaypoints` if `sequence` has fewer than two entries
    /// - `DirectionsUnavailable` for the first leg that could not be routed
    pub async fn resolve(&mut self, sequence: &[ResolvedWaypoint]) -> Result<Itinerary, PlanError> {
        self.state = ResolutionState::Idle;

        if sequence.len() < 2 {
            return Err(PlanError::InsufficientWaypoints);
        }

        let mut legs = Vec::with_capacity(sequence.len() - 1);
        for (index, pair) in sequence.windows(2).enumerate() {
            self.transition(ResolutionState::ResolvingLeg(index));

            match self.resolver.resolve_leg(&pair[0], &pair[1]).await {
                Ok(leg) => legs.push(leg),
                Err(e) => {
                    let e = e.at_leg(index);
                    warn!(leg = index, error = %e, "leg resolution failed");
                    self.transition(ResolutionState::Failed);
                    return Err(e);
                }
            }
        }

        match Itinerary::new(legs) {
            Ok(itinerary) => {
                self.transition(ResolutionState::Complete);
                Ok(itinerary)
            }
            Err(e) => {
                self.transition(ResolutionState::Failed);
                Err(e.into())
            }
        }
    }
}
