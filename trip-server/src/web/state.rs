//! Application state for the web layer.

use std::sync::Arc;

use crate::geocoding::GeocodingProvider;
use crate::planner::TripPlanner;

use super::sessions::TripSessions;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Directions provider plus planner configuration
    pub planner: TripPlanner,

    /// Geocoder, usually wrapped in a cache
    pub geocoder: Arc<dyn GeocodingProvider>,

    /// Per-trip waypoint stores
    pub sessions: TripSessions,
}

impl AppState {
    /// Create a new app state.
    pub fn new(planner: TripPlanner, geocoder: Arc<dyn GeocodingProvider>) -> Self {
        Self {
            planner,
            geocoder,
            sessions: TripSessions::new(),
        }
    }
}
