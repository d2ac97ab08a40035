//! Round-trip itinerary server.
//!
//! A web application that answers: "starting here and visiting these
//! stops, what is the fastest way around and back, and how long will it
//! take?"

pub mod cache;
pub mod directions;
pub mod domain;
pub mod geocoding;
pub mod planner;
pub mod web;
