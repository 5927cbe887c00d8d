//! Data model for the route comparison engine.

pub mod mode;
pub mod preferences;
pub mod route;

pub use mode::{CostFactors, TransportMode};
pub use preferences::{Criterion, PreferenceWeights};
pub use route::{Route, RouteSummary, ScoredRoute};
