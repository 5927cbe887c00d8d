//! HTTP handlers.
//!
//! The comparison pipeline mirrors the client flow: resolve both endpoints,
//! fetch per-mode routes sequentially (one in-flight collaborator request
//! at a time, with fixed delays for the public rate limits), degrade to
//! synthetic estimates on failure, then rank with the core scoring engine.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::Local;
use geo::Point;
use serde::Deserialize;
use serde_json::json;
use tokio::time::sleep;
use tracing::{info, warn};

use greenpath_core::geocode::{self, GeocodedPlace};
use greenpath_core::prelude::*;
use greenpath_core::tracking::{CommuteTotals, achievements};
use greenpath_core::{estimate, fallback, scoring, tips};

use crate::clients::osrm::OsrmProfile;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn health() -> &'static str {
    "OK"
}

// ---------------------------------------------------------------------------
// /route — routing proxy
// ---------------------------------------------------------------------------

/// Proxies the routing collaborator, returning its JSON body verbatim on
/// success and its status code on failure.
pub async fn route_proxy(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let profile = OsrmProfile::parse(params.get("profile").map_or("car", String::as_str));
    let (Some(start), Some(end)) = (params.get("start"), params.get("end")) else {
        return Err(ApiError::MissingInput("start or end coordinates"));
    };

    let (status, body) = state
        .osrm
        .fetch_raw(profile, start, end)
        .await
        .map_err(ApiError::from)?;

    if !(200..300).contains(&status) {
        warn!(status, "routing collaborator error");
        return Err(ApiError::Upstream {
            service: "routing",
            status,
        });
    }

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

// ---------------------------------------------------------------------------
// /compare — the full pipeline
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CompareParams {
    #[serde(default)]
    origin: String,
    #[serde(default)]
    destination: String,
    time: Option<u32>,
    cost: Option<u32>,
    emissions: Option<u32>,
    /// Comma-separated mode list; defaults to the standard comparison set.
    modes: Option<String>,
}

const DEFAULT_COMPARISON: [TransportMode; 6] = [
    TransportMode::Walk,
    TransportMode::Bike,
    TransportMode::Bus,
    TransportMode::Train,
    TransportMode::Rideshare,
    TransportMode::Car,
];

pub async fn compare(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CompareParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if params.origin.trim().is_empty() {
        return Err(ApiError::MissingInput("origin"));
    }
    if params.destination.trim().is_empty() {
        return Err(ApiError::MissingInput("destination"));
    }

    let weights = match (params.time, params.cost, params.emissions) {
        (None, None, None) => PreferenceWeights::default(),
        (time, cost, emissions) => PreferenceWeights::new(
            time.unwrap_or(0),
            cost.unwrap_or(0),
            emissions.unwrap_or(0),
        )?,
    };
    let modes = parse_modes(params.modes.as_deref())?;

    let token = state.begin_search();

    let origin = resolve(&state, &params.origin, token).await?;
    // Fixed pause between the two sequential geocodes, for the public
    // rate limits.
    sleep(state.config.geocode_delay()).await;
    let destination = resolve(&state, &params.destination, token).await?;

    let peak = estimate::is_peak_now();
    let routes = fetch_candidates(&state, &modes, &origin, &destination, peak, token).await?;

    let ranked = scoring::rank_routes(routes, &weights);
    let geojson = scoring::ranking_to_geojson(&ranked);
    let summaries: Vec<RouteSummary> = ranked.iter().map(RouteSummary::from).collect();
    let impact = impact_summary(&ranked);

    info!(
        origin = %origin.display_name,
        destination = %destination.display_name,
        candidates = summaries.len(),
        "comparison complete"
    );

    Ok(Json(json!({
        "origin": origin,
        "destination": destination,
        "peak_hour": peak,
        "weights": weights,
        "routes": summaries,
        "impact": impact,
        "geojson": geojson,
    })))
}

fn parse_modes(raw: Option<&str>) -> Result<Vec<TransportMode>, ApiError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_COMPARISON.to_vec());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<TransportMode>().map_err(ApiError::from))
        .collect()
}

/// Resolves free text to a place: coordinate literals bypass the geocoder,
/// everything else walks the simplification ladder with a bounded delay
/// between attempts.
async fn resolve(
    state: &AppState,
    input: &str,
    token: u64,
) -> Result<GeocodedPlace, ApiError> {
    if let Some(point) = geocode::parse_coordinate_pair(input)? {
        return Ok(GeocodedPlace {
            lat: point.y(),
            lon: point.x(),
            display_name: input.to_string(),
        });
    }

    let plan = geocode::query_plan(input);
    for (idx, attempt) in plan.iter().enumerate() {
        if idx > 0 {
            sleep(state.config.geocode_delay()).await;
        }
        if !state.is_current(token) {
            return Err(ApiError::Superseded);
        }

        match state.nominatim.search(&attempt.query, 3).await {
            Ok(results) => {
                if let Some(place) = results.into_iter().next() {
                    return Ok(place);
                }
            }
            // A failed attempt falls through to the next ladder stage.
            Err(err) => warn!(query = %attempt.query, error = ?err, "geocode attempt failed"),
        }
    }

    Err(ApiError::NoGeocodeMatch {
        input: input.to_string(),
    })
}

/// Fetches one candidate per mode, sequentially. Collaborator failures and
/// rail modes (no road profile) degrade to synthetic estimates, so the
/// comparison always has a full candidate set.
async fn fetch_candidates(
    state: &AppState,
    modes: &[TransportMode],
    origin: &GeocodedPlace,
    destination: &GeocodedPlace,
    peak: bool,
    token: u64,
) -> Result<Vec<Route>, ApiError> {
    let start = origin.point();
    let end = destination.point();

    let mut routes = Vec::with_capacity(modes.len());
    let mut first_fetch = true;

    for &mode in modes {
        let Some(profile) = OsrmProfile::for_mode(mode) else {
            routes.push(fallback::synthetic_route(mode, start, end, peak));
            continue;
        };

        if !first_fetch {
            sleep(state.config.route_delay()).await;
        }
        first_fetch = false;
        if !state.is_current(token) {
            return Err(ApiError::Superseded);
        }

        match state.osrm.fetch_route(profile, start, end).await {
            Ok(fetched) => {
                let mut route = Route::from_collaborator(
                    mode,
                    fetched.path,
                    fetched.distance_m,
                    fetched.duration_s,
                    peak,
                );
                // The driving profile's duration only matches car-speed
                // modes; slower road modes keep the geometry but derive
                // duration from their own fixed speed.
                if profile == OsrmProfile::Driving && mode.average_speed_kmh() < 35.0 {
                    route.duration_s =
                        estimate::travel_time_minutes(mode, route.distance_km()) * 60.0;
                }
                routes.push(route);
            }
            Err(err) => {
                warn!(mode = %mode, error = ?err, "route fetch failed, using estimate");
                routes.push(fallback::synthetic_route(mode, start, end, peak));
            }
        }
    }

    Ok(routes)
}

/// Environmental impact summary: best eco option versus the car baseline.
fn impact_summary(ranked: &[ScoredRoute]) -> serde_json::Value {
    let Some(greenest) = ranked
        .iter()
        .min_by(|a, b| a.route.emissions_g.total_cmp(&b.route.emissions_g))
    else {
        return json!(null);
    };
    let car_emissions = ranked
        .iter()
        .find(|s| s.route.mode == TransportMode::Car)
        .map_or_else(
            || estimate::emissions(TransportMode::Car, greenest.route.distance_km()),
            |car| car.route.emissions_g,
        );

    let saved = (car_emissions - greenest.route.emissions_g).max(0.0);
    json!({
        "greenest_mode": greenest.route.mode,
        "saved_grams": saved,
        "saved_label": estimate::format_emissions(saved),
        "equivalents": estimate::savings_equivalents(saved),
    })
}

// ---------------------------------------------------------------------------
// Geocoding endpoints
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GeocodeParams {
    #[serde(default)]
    q: String,
}

pub async fn geocode_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GeocodeParams>,
) -> Result<Json<GeocodedPlace>, ApiError> {
    if params.q.trim().is_empty() {
        return Err(ApiError::MissingInput("query"));
    }
    let token = state.begin_search();
    let place = resolve(&state, &params.q, token).await?;
    Ok(Json(place))
}

#[derive(Debug, Deserialize)]
pub struct PointParams {
    lat: f64,
    lon: f64,
}

pub async fn reverse_geocode(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PointParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let display_name = state
        .nominatim
        .reverse(params.lat, params.lon)
        .await?
        // Fall back to a plain coordinate label, like the client does.
        .unwrap_or_else(|| format!("{:.6}, {:.6}", params.lat, params.lon));
    Ok(Json(json!({ "display_name": display_name })))
}

#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    category: String,
    lat: f64,
    lon: f64,
}

pub async fn nearby(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NearbyParams>,
) -> Result<Json<Vec<GeocodedPlace>>, ApiError> {
    if params.category.trim().is_empty() {
        return Err(ApiError::MissingInput("category"));
    }
    let places = state
        .nominatim
        .nearby(&params.category, params.lat, params.lon)
        .await?;
    Ok(Json(places))
}

// ---------------------------------------------------------------------------
// Safety points
// ---------------------------------------------------------------------------

pub async fn safety_points(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PointParams>,
) -> Json<Vec<SafetyPin>> {
    let center = Point::new(params.lon, params.lat);
    let mut pins = fallback_pins(center);

    // Live results are merged in front of the fallback ring; a failed
    // lookup is silent and leaves only the generated fallback.
    match state.overpass.safety_points(params.lat, params.lon).await {
        Ok(live) => {
            let mut merged = live;
            merged.append(&mut pins);
            pins = merged;
        }
        Err(err) => warn!(error = ?err, "safety lookup failed, fallback only"),
    }

    Json(pins)
}

// ---------------------------------------------------------------------------
// Tracking and rewards
// ---------------------------------------------------------------------------

pub async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<serde_json::Value>, ApiError> {
    let handle = state
        .session
        .lock()
        .map_err(|_| ApiError::Internal("session lock poisoned".to_string()))?;

    let balance = handle.state.balance;
    let totals: CommuteTotals = handle.state.totals();
    let history = handle.state.history.clone();
    drop(handle);

    Ok(Json(json!({
        "credits": balance.credits,
        "total_saved_grams": balance.total_saved_grams,
        "total_saved_label": estimate::format_emissions(balance.total_saved_grams),
        "level": balance.level(),
        "credits_into_level": balance.credits_into_level(),
        "achievements": achievements(balance.credits),
        "totals": totals,
        "history": history,
    })))
}

#[derive(Debug, Deserialize)]
pub struct TripRequest {
    mode: TransportMode,
    distance_km: f64,
    date: Option<chrono::NaiveDate>,
}

pub async fn record_trip(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TripRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !(request.distance_km.is_finite() && request.distance_km > 0.0) {
        return Err(ApiError::InvalidInput(
            "distance_km must be positive".to_string(),
        ));
    }

    let date = request.date.unwrap_or_else(|| Local::now().date_naive());
    let (earned, balance) = {
        let mut handle = state
            .session
            .lock()
            .map_err(|_| ApiError::Internal("session lock poisoned".to_string()))?;
        let earned = handle.state.record_trip(request.mode, request.distance_km, date);
        (earned, handle.state.balance)
    };
    state.persist_session()?;

    info!(mode = %request.mode, distance_km = request.distance_km, earned, "trip recorded");
    Ok(Json(json!({
        "credits_earned": earned,
        "credits": balance.credits,
        "total_saved_grams": balance.total_saved_grams,
        "level": balance.level(),
    })))
}

// ---------------------------------------------------------------------------
// Freight calculator and tips
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct FreightParams {
    method: TransportMode,
    weight_kg: f64,
    distance_km: f64,
}

pub async fn freight(
    Query(params): Query<FreightParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !params.method.is_freight() {
        return Err(ApiError::InvalidInput(format!(
            "{} is not a freight method",
            params.method
        )));
    }
    if params.weight_kg <= 0.0 || params.distance_km <= 0.0 {
        return Err(ApiError::InvalidInput(
            "weight_kg and distance_km must be positive".to_string(),
        ));
    }

    let grams = estimate::freight_emissions(params.method, params.weight_kg, params.distance_km);
    let rail_grams =
        estimate::freight_emissions(TransportMode::FreightRail, params.weight_kg, params.distance_km);

    Ok(Json(json!({
        "method": params.method,
        "ton_km": params.weight_kg / 1000.0 * params.distance_km,
        "emissions_grams": grams,
        "emissions_label": estimate::format_emissions(grams),
        "car_km_equivalent": estimate::savings_equivalents(grams).car_km,
        // Modal-shift hint: how much a rail shipment would cut.
        "rail_savings_grams": (grams - rail_grams).max(0.0),
    })))
}

pub async fn emission_tips() -> Json<serde_json::Value> {
    Json(json!({ "tips": tips::TIPS }))
}
