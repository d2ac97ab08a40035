//! Domain types for the round-trip planner.
//!
//! This module contains the core domain model: waypoints and the store
//! that holds them, routes, legs and itineraries. Types enforce their
//! invariants at construction time, so code that receives them can trust
//! their validity.

mod coordinate;
mod error;
mod itinerary;
mod leg;
mod route;
mod store;
mod units;
mod waypoint;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use error::DomainError;
pub use itinerary::Itinerary;
pub use leg::Leg;
pub use route::{Route, RouteStep, TransportMode};
pub use store::{SLOT_COUNT, WaypointStore};
pub use units::{METERS_PER_MILE, format_duration, format_miles};
pub use waypoint::{ResolvedWaypoint, Waypoint, WaypointSlot};
