//! Directions provider and OSRM route API client.
//!
//! This module provides the `DirectionsProvider` abstraction used by the
//! planner, an HTTP client for the OSRM route service, and a mock provider
//! for tests and offline development.
//!
//! Key characteristics of OSRM:
//! - Coordinates are sent as `lon,lat` and returned as `[lon, lat]`
//! - Failures such as "no route" come back as a response code in a JSON
//!   body, often with an HTTP 400
//! - Steps carry maneuvers rather than display text, so instructions are
//!   composed locally

mod client;
mod convert;
mod error;
mod mock;
mod provider;
mod types;

pub use client::{OSRM_ROUTE_API_PATH, OsrmClient, OsrmConfig, profile_for};
pub use convert::{convert_route, convert_route_response, step_instruction};
pub use error::DirectionsError;
pub use mock::MockDirectionsProvider;
pub use provider::{DirectionsProvider, DirectionsRequest};
pub use types::{OsrmGeometry, OsrmLeg, OsrmManeuver, OsrmRoute, OsrmRouteResponse, OsrmStep};
