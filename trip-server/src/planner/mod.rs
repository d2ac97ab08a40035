//! Round-trip planner.
//!
//! This module answers: "given a start point and up to two stops, what is
//! the fastest way around all of them and back?"
//!
//! Each consecutive pair of the closed waypoint sequence becomes a leg.
//! A leg takes the fastest of the provider's candidate routes, and legs are
//! resolved one at a time in travel order.

mod aggregator;
mod config;
mod error;
mod resolver;
mod trip;

#[cfg(test)]
mod aggregator_tests;

pub use aggregator::{ItineraryAggregator, ResolutionState};
pub use config::PlannerConfig;
pub use error::PlanError;
pub use resolver::{LegResolver, select_fastest};
pub use trip::{TripPlanner, submit_trip};
