//! `greenpath_core` — estimation and ranking engine for carbon-aware route
//! comparison.
//!
//! Everything networked (routing, geocoding, map rendering) lives outside
//! this crate; the server drives those collaborators and feeds their raw
//! results through the pure model here:
//!
//! - [`model`] — transport modes and their fixed coefficients, route
//!   candidates, preference weights
//! - [`estimate`] — emissions, cost, travel time, calories, credits
//! - [`scoring`] — weighted normalized ranking of a candidate set
//! - [`fallback`] — synthetic routes when the routing collaborator fails
//! - [`geocode`] — coordinate literals and the query simplification ladder
//! - [`safety`] — deterministic fallback safety pins
//! - [`tracking`] — commute history, credits, persistence boundary

pub mod error;
pub mod estimate;
pub mod fallback;
pub mod geocode;
pub mod model;
pub mod prelude;
pub mod safety;
pub mod scoring;
pub mod tips;
pub mod tracking;

#[cfg(test)]
mod tests;

pub use error::Error;
pub use model::{Criterion, PreferenceWeights, Route, RouteSummary, ScoredRoute, TransportMode};
