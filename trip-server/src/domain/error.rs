//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from provider/IO errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Slot index outside the waypoint store
    #[error("waypoint slot {index} is out of range (0..{count})")]
    SlotOutOfRange { index: usize, count: usize },

    /// Not enough resolved waypoints to form a round trip
    #[error("a starting point and at least one stop are required")]
    InsufficientWaypoints,

    /// Itinerary has no legs
    #[error("itinerary must have at least one leg")]
    EmptyItinerary,

    /// Consecutive legs don't share an endpoint
    #[error("leg ending at {0:?} does not connect to leg starting at {1:?}")]
    LegsNotConnected(String, String),
}
