//! Pure estimation model: (mode, distance) to emissions, cost, travel time
//! and calories. Every function is total over its documented domain and has
//! no side effects.

use chrono::Timelike;
use serde::Serialize;

use crate::model::TransportMode;

/// Grams of CO₂ saved per single phone charge, for savings equivalents.
const GRAMS_PER_PHONE_CHARGE: f64 = 8.2;

/// Grams of CO₂ emitted per car-km, the all-car comparison baseline.
const CAR_GRAMS_PER_KM: f64 = 192.0;

/// Peak-hour surge multiplier for on-demand modes.
const SURGE_MULTIPLIER: f64 = 1.5;

/// Body weight the calorie coefficients are calibrated against, in kg.
pub const REFERENCE_WEIGHT_KG: f64 = 70.0;

/// Estimated CO₂ in grams for a passenger trip.
pub fn emissions(mode: TransportMode, distance_km: f64) -> f64 {
    mode.emission_factor() * distance_km
}

/// Estimated CO₂ in grams for a freight shipment, on a ton-km basis.
pub fn freight_emissions(mode: TransportMode, weight_kg: f64, distance_km: f64) -> f64 {
    let weight_tons = weight_kg / 1000.0;
    mode.emission_factor() * weight_tons * distance_km
}

/// Estimated door-to-door travel time in minutes.
pub fn travel_time_minutes(mode: TransportMode, distance_km: f64) -> f64 {
    (distance_km / mode.average_speed_kmh()) * 60.0
}

/// Estimated trip cost in USD.
///
/// The peak-hour surge applies to on-demand modes before any passenger
/// split; pooling divides the cost for car and rideshare trips.
pub fn trip_cost(mode: TransportMode, distance_km: f64, peak_hour: bool, passengers: u32) -> f64 {
    let factors = mode.cost_factors();
    let mut cost = factors.base_fare + factors.per_km * distance_km;

    if peak_hour && mode.is_on_demand() {
        cost *= SURGE_MULTIPLIER;
    }
    if passengers > 1 && mode.supports_pooling() {
        cost /= f64::from(passengers);
    }
    cost
}

/// Kilocalories burned on active modes, scaled by body weight against a
/// 70 kg reference. `None` for motorized modes.
pub fn calories(mode: TransportMode, distance_km: f64, weight_kg: f64) -> Option<f64> {
    mode.calories_per_km()
        .map(|per_km| per_km * distance_km * (weight_kg / REFERENCE_WEIGHT_KG))
}

/// Carbon credits earned: 1 credit per full 100 g of CO₂ saved.
pub fn carbon_credits(saved_grams: f64) -> u64 {
    (saved_grams / 100.0).floor().max(0.0) as u64
}

/// Grams of CO₂ saved versus a baseline mode over the same distance.
/// Never negative: choosing a dirtier mode saves nothing.
pub fn savings(mode: TransportMode, distance_km: f64, baseline: TransportMode) -> f64 {
    (emissions(baseline, distance_km) - emissions(mode, distance_km)).max(0.0)
}

/// Display convention: grams below 1 kg, kilograms with two decimals from
/// exactly 1000 g upward.
pub fn format_emissions(grams: f64) -> String {
    if grams >= 1000.0 {
        format!("{:.2} kg CO₂", grams / 1000.0)
    } else {
        format!("{}g CO₂", grams.round() as i64)
    }
}

/// Emission bucket for color coding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmissionLevel {
    Zero,
    Low,
    Medium,
    High,
}

pub fn emission_level(grams: f64) -> EmissionLevel {
    if grams == 0.0 {
        EmissionLevel::Zero
    } else if grams < 50.0 {
        EmissionLevel::Low
    } else if grams < 150.0 {
        EmissionLevel::Medium
    } else {
        EmissionLevel::High
    }
}

/// Peak windows are 07:00-09:59 and 17:00-19:59 local time.
pub fn is_peak_hour(hour: u32) -> bool {
    (7..=9).contains(&hour) || (17..=19).contains(&hour)
}

/// Peak predicate for the current local time.
pub fn is_peak_now() -> bool {
    is_peak_hour(chrono::Local::now().hour())
}

/// Tangible equivalents for a CO₂ saving, used in impact summaries.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SavingsEquivalents {
    pub phone_charges: u64,
    pub car_km: f64,
}

pub fn savings_equivalents(saved_grams: f64) -> SavingsEquivalents {
    SavingsEquivalents {
        phone_charges: (saved_grams / GRAMS_PER_PHONE_CHARGE).round().max(0.0) as u64,
        car_km: saved_grams / CAR_GRAMS_PER_KM,
    }
}
