//! Planner configuration.

use crate::directions::DirectionsRequest;
use crate::domain::{Coordinate, TransportMode};

/// Configuration parameters for trip planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerConfig {
    /// How every leg is travelled.
    pub mode: TransportMode,

    /// Ask the provider for alternate routes so the fastest can be chosen.
    pub alternatives: bool,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(mode: TransportMode, alternatives: bool) -> Self {
        Self { mode, alternatives }
    }

    /// Set the transport mode.
    pub fn with_mode(mut self, mode: TransportMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable or disable alternate routes.
    pub fn with_alternatives(mut self, alternatives: bool) -> Self {
        self.alternatives = alternatives;
        self
    }

    /// Directions request for one leg.
    pub fn request(&self, origin: Coordinate, destination: Coordinate) -> DirectionsRequest {
        DirectionsRequest {
            origin,
            destination,
            alternatives: self.alternatives,
            mode: self.mode,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            mode: TransportMode::Automobile,
            alternatives: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.mode, TransportMode::Automobile);
        assert!(config.alternatives);
    }

    #[test]
    fn custom_config() {
        let config = PlannerConfig::default()
            .with_mode(TransportMode::Walking)
            .with_alternatives(false);
        assert_eq!(config, PlannerConfig::new(TransportMode::Walking, false));

        let a = Coordinate::new(1.0, 2.0).unwrap();
        let b = Coordinate::new(3.0, 4.0).unwrap();
        let request = config.request(a, b);
        assert_eq!(request.origin, a);
        assert_eq!(request.destination, b);
        assert_eq!(request.mode, TransportMode::Walking);
        assert!(!request.alternatives);
    }
}
