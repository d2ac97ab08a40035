//! Web layer for the round-trip planner.
//!
//! Provides HTTP endpoints for geocoding addresses, editing a trip's
//! waypoints and planning the round trip.

mod dto;
mod routes;
mod sessions;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use sessions::{SessionError, SessionId, TripSessions};
pub use state::AppState;
pub use templates::*;
