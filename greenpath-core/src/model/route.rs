//! Route candidates produced by the routing collaborator or the synthetic
//! fallback, annotated with the estimates the scoring engine consumes.

use geo::{LineString, Point};
use serde::Serialize;

use super::mode::TransportMode;
use crate::estimate;

/// One candidate trip for one mode. Immutable once computed; discarded and
/// recomputed whenever origin, destination or mode set changes.
#[derive(Debug, Clone)]
pub struct Route {
    pub mode: TransportMode,
    /// Ordered path geometry in lon/lat order (GeoJSON convention).
    pub path: LineString<f64>,
    pub distance_m: f64,
    pub duration_s: f64,
    pub cost_usd: f64,
    pub emissions_g: f64,
    pub color: &'static str,
    /// Whether the geometry came from the synthetic fallback rather than
    /// the routing collaborator.
    pub estimated: bool,
}

impl Route {
    /// Builds a candidate from raw collaborator output, deriving cost and
    /// emissions from the mode coefficients.
    pub fn from_collaborator(
        mode: TransportMode,
        path: LineString<f64>,
        distance_m: f64,
        duration_s: f64,
        peak_hour: bool,
    ) -> Self {
        let distance_km = distance_m / 1000.0;
        Self {
            mode,
            path,
            distance_m,
            duration_s,
            cost_usd: estimate::trip_cost(mode, distance_km, peak_hour, 1),
            emissions_g: estimate::emissions(mode, distance_km),
            color: mode.render_color(),
            estimated: false,
        }
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_s / 60.0
    }

    pub fn start(&self) -> Option<Point<f64>> {
        self.path.points().next()
    }

    pub fn end(&self) -> Option<Point<f64>> {
        self.path.points().next_back()
    }
}

/// A route plus its derived composite score; used only for ordering.
#[derive(Debug, Clone)]
pub struct ScoredRoute {
    pub route: Route,
    /// 0-100, higher is a better fit for the active preferences.
    pub score: f64,
    /// Top-ranked in its candidate set.
    pub best: bool,
}

/// Flat summary of a scored route for JSON responses.
#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    pub mode: TransportMode,
    pub distance_m: f64,
    pub duration_s: f64,
    pub cost_usd: f64,
    pub emissions_g: f64,
    pub emissions_label: String,
    /// Kilocalories for active modes at a reference body weight, absent
    /// otherwise.
    pub calories: Option<f64>,
    pub score: f64,
    pub best: bool,
    pub estimated: bool,
    pub color: &'static str,
}

impl From<&ScoredRoute> for RouteSummary {
    fn from(scored: &ScoredRoute) -> Self {
        Self {
            mode: scored.route.mode,
            distance_m: scored.route.distance_m,
            duration_s: scored.route.duration_s,
            cost_usd: scored.route.cost_usd,
            emissions_g: scored.route.emissions_g,
            emissions_label: estimate::format_emissions(scored.route.emissions_g),
            calories: estimate::calories(
                scored.route.mode,
                scored.route.distance_km(),
                estimate::REFERENCE_WEIGHT_KG,
            ),
            score: scored.score,
            best: scored.best,
            estimated: scored.route.estimated,
            color: scored.route.color,
        }
    }
}
