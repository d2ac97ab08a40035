//! Planning error types.

use crate::domain::DomainError;

/// Error from planning a trip.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// Fewer than two resolved waypoints (start plus at least one stop)
    #[error("a starting point and at least one stop are required")]
    InsufficientWaypoints,

    /// A leg could not be routed
    #[error("directions not available for leg {leg_index}: {reason}")]
    DirectionsUnavailable { leg_index: usize, reason: String },

    /// The resolved legs did not form a valid itinerary
    #[error("invalid itinerary: {0}")]
    InvalidItinerary(DomainError),
}

impl PlanError {
    /// Build a `DirectionsUnavailable` for the given leg.
    pub fn directions_unavailable(leg_index: usize, reason: impl Into<String>) -> Self {
        PlanError::DirectionsUnavailable {
            leg_index,
            reason: reason.into(),
        }
    }

    /// Attach a leg index to a `DirectionsUnavailable`.
    pub fn at_leg(self, index: usize) -> Self {
        match self {
            PlanError::DirectionsUnavailable { reason, .. } => PlanError::DirectionsUnavailable {
                leg_index: index,
                reason,
            },
            other => other,
        }
    }

    /// Message shown to the person planning the trip.
    pub fn user_message(&self) -> &'static str {
        match self {
            PlanError::InsufficientWaypoints => {
                "Please enter a valid starting and at least one destination."
            }
            PlanError::DirectionsUnavailable { .. } | PlanError::InvalidItinerary(_) => {
                "Directions not available."
            }
        }
    }
}

impl From<DomainError> for PlanError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InsufficientWaypoints => PlanError::InsufficientWaypoints,
            other => PlanError::InvalidItinerary(other),
        }
    }
}
