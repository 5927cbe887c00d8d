//! Route scoring engine: ranks a candidate set by a user-weighted blend of
//! normalized time, cost and emission sub-scores.
//!
//! Scores are normalized against the maxima of the *current* candidate set,
//! not global constants, so they are only meaningful within one comparison.
//! This always surfaces a visible spread among whatever modes are available,
//! even when absolute values are small.

use geojson::{Feature, FeatureCollection, Geometry};
use serde_json::json;

use crate::estimate;
use crate::model::{PreferenceWeights, Route, ScoredRoute};

/// Ranks candidates best-match first.
///
/// Each sub-score is `(1 - value / max) * 100` where lower raw values are
/// better; an axis with no spread across the candidate set scores 100 for
/// everyone, so a single candidate or a full tie composites to 100.
/// The composite is the weight-blended average. The sort is stable, so ties
/// keep their input order; the top entry is flagged best. An empty input
/// yields an empty ranking.
pub fn rank_routes(routes: Vec<Route>, weights: &PreferenceWeights) -> Vec<ScoredRoute> {
    if routes.is_empty() {
        return Vec::new();
    }

    let duration_spread = spread(routes.iter().map(|r| r.duration_s));
    let cost_spread = spread(routes.iter().map(|r| r.cost_usd));
    let emissions_spread = spread(routes.iter().map(|r| r.emissions_g));

    let mut scored: Vec<ScoredRoute> = routes
        .into_iter()
        .map(|route| {
            let time_score = sub_score(route.duration_s, duration_spread);
            let cost_score = sub_score(route.cost_usd, cost_spread);
            let emissions_score = sub_score(route.emissions_g, emissions_spread);

            let score = (time_score * f64::from(weights.time)
                + cost_score * f64::from(weights.cost)
                + emissions_score * f64::from(weights.emissions))
                / 100.0;

            ScoredRoute {
                route,
                score,
                best: false,
            }
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored[0].best = true;
    scored
}

fn spread(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, 0.0), |(min, max), v| {
        (f64::min(min, v), f64::max(max, v))
    })
}

fn sub_score(value: f64, (min, max): (f64, f64)) -> f64 {
    if max > min {
        (1.0 - value / max) * 100.0
    } else {
        100.0
    }
}

/// Converts a ranked set into a `GeoJSON` `FeatureCollection`, one
/// LineString feature per route with its metrics as properties.
pub fn ranking_to_geojson(ranked: &[ScoredRoute]) -> FeatureCollection {
    let features = ranked
        .iter()
        .map(|scored| {
            let route = &scored.route;
            let value = json!({
                "type": "Feature",
                "geometry": Geometry::new((&route.path).into()),
                "properties": {
                    "mode": route.mode.as_str(),
                    "distance_m": route.distance_m,
                    "duration_s": route.duration_s,
                    "cost_usd": route.cost_usd,
                    "emissions_g": route.emissions_g,
                    "emissions_label": estimate::format_emissions(route.emissions_g),
                    "score": scored.score,
                    "best_match": scored.best,
                    "estimated": route.estimated,
                    "color": route.color,
                }
            });
            serde_json::from_value::<Feature>(value).expect("feature built from valid JSON")
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
