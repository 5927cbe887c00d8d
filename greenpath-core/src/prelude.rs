// Re-export key components
pub use crate::error::Error;
pub use crate::estimate::{
    calories, carbon_credits, emission_level, emissions, format_emissions, freight_emissions,
    is_peak_hour, savings, savings_equivalents, travel_time_minutes, trip_cost,
};
pub use crate::fallback::{haversine_km, synthetic_route, terrain_multiplier};
pub use crate::geocode::{GeocodedPlace, parse_coordinate_pair, query_plan};
pub use crate::model::{
    Criterion, PreferenceWeights, Route, RouteSummary, ScoredRoute, TransportMode,
};
pub use crate::safety::{SafetyCategory, SafetyPin, fallback_pins};
pub use crate::scoring::{rank_routes, ranking_to_geojson};
pub use crate::tracking::{
    CarbonCreditBalance, CommuteEntry, KeyValueStore, SessionState, load_session, save_session,
};
