//! Transport modes and their fixed coefficients.
//!
//! Emission factors follow EPA/DEFRA per-passenger-km averages (per ton-km
//! for freight carriers). All coefficients are process-wide constants.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Per-km cost structure in USD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostFactors {
    pub base_fare: f64,
    pub per_km: f64,
}

/// A transportation method with fixed emission, speed and cost coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransportMode {
    Walk,
    Bike,
    Bus,
    Train,
    Subway,
    Tram,
    Car,
    CarElectric,
    CarHybrid,
    Rideshare,
    RidesharePool,
    Taxi,
    FreightTruck,
    FreightRail,
    FreightShip,
    FreightAir,
}

impl TransportMode {
    /// All modes, in comparison-display order.
    pub const ALL: [TransportMode; 16] = [
        TransportMode::Walk,
        TransportMode::Bike,
        TransportMode::Bus,
        TransportMode::Train,
        TransportMode::Subway,
        TransportMode::Tram,
        TransportMode::Car,
        TransportMode::CarElectric,
        TransportMode::CarHybrid,
        TransportMode::Rideshare,
        TransportMode::RidesharePool,
        TransportMode::Taxi,
        TransportMode::FreightTruck,
        TransportMode::FreightRail,
        TransportMode::FreightShip,
        TransportMode::FreightAir,
    ];

    /// Grams of CO₂ per passenger-km (per ton-km for freight carriers).
    pub fn emission_factor(self) -> f64 {
        match self {
            TransportMode::Walk => 0.0,
            TransportMode::Bike => 0.0,
            TransportMode::Bus => 89.0,
            TransportMode::Train => 41.0,
            TransportMode::Subway => 28.0,
            TransportMode::Tram => 29.0,
            TransportMode::Car => 192.0,
            TransportMode::CarElectric => 53.0,
            TransportMode::CarHybrid => 120.0,
            TransportMode::Rideshare => 192.0,
            TransportMode::RidesharePool => 96.0,
            TransportMode::Taxi => 211.0,
            TransportMode::FreightTruck => 62.0,
            TransportMode::FreightRail => 22.0,
            TransportMode::FreightShip => 10.0,
            TransportMode::FreightAir => 500.0,
        }
    }

    /// Average door-to-door speed in km/h. Strictly positive for every mode,
    /// so time estimates never divide by zero.
    pub fn average_speed_kmh(self) -> f64 {
        match self {
            TransportMode::Walk => 5.0,
            TransportMode::Bike => 15.0,
            TransportMode::Bus => 20.0,
            TransportMode::Train => 60.0,
            TransportMode::Subway => 35.0,
            TransportMode::Tram => 25.0,
            TransportMode::Car => 40.0,
            TransportMode::CarElectric => 40.0,
            TransportMode::CarHybrid => 40.0,
            TransportMode::Rideshare => 40.0,
            TransportMode::RidesharePool => 38.0,
            TransportMode::Taxi => 35.0,
            TransportMode::FreightTruck => 60.0,
            TransportMode::FreightRail => 50.0,
            TransportMode::FreightShip => 30.0,
            TransportMode::FreightAir => 750.0,
        }
    }

    /// Trip cost structure. Freight carriers carry a zero structure: freight
    /// pricing is not part of the passenger comparison.
    pub fn cost_factors(self) -> CostFactors {
        let (base_fare, per_km) = match self {
            TransportMode::Walk => (0.0, 0.0),
            // Wear and tear / bike share
            TransportMode::Bike => (0.0, 0.15),
            TransportMode::Bus => (2.75, 0.0),
            TransportMode::Train => (3.0, 0.25),
            TransportMode::Subway => (2.75, 0.0),
            TransportMode::Tram => (2.25, 0.0),
            // IRS standard mileage rate (fuel, maintenance, depreciation)
            TransportMode::Car => (0.0, 0.58),
            TransportMode::CarElectric => (0.0, 0.45),
            TransportMode::CarHybrid => (0.0, 0.52),
            TransportMode::Rideshare => (2.5, 2.5),
            TransportMode::RidesharePool => (2.0, 1.75),
            TransportMode::Taxi => (3.5, 2.0),
            TransportMode::FreightTruck
            | TransportMode::FreightRail
            | TransportMode::FreightShip
            | TransportMode::FreightAir => (0.0, 0.0),
        };
        CostFactors { base_fare, per_km }
    }

    /// Kilocalories burned per km for active modes.
    pub fn calories_per_km(self) -> Option<f64> {
        match self {
            TransportMode::Walk => Some(65.0),
            TransportMode::Bike => Some(40.0),
            _ => None,
        }
    }

    /// Polyline color on the map surface.
    pub fn render_color(self) -> &'static str {
        match self {
            TransportMode::Walk => "#3b82f6",
            TransportMode::Bike => "#8b5cf6",
            TransportMode::Bus => "#10b981",
            TransportMode::Train => "#f59e0b",
            TransportMode::Subway => "#06b6d4",
            TransportMode::Tram => "#14b8a6",
            TransportMode::Car => "#ef4444",
            TransportMode::CarElectric => "#84cc16",
            TransportMode::CarHybrid => "#eab308",
            TransportMode::Rideshare => "#f97316",
            TransportMode::RidesharePool => "#fb923c",
            TransportMode::Taxi => "#facc15",
            TransportMode::FreightTruck => "#a16207",
            TransportMode::FreightRail => "#78716c",
            TransportMode::FreightShip => "#0ea5e9",
            TransportMode::FreightAir => "#dc2626",
        }
    }

    /// Freight carriers are billed per ton-km instead of per passenger-km.
    pub fn is_freight(self) -> bool {
        matches!(
            self,
            TransportMode::FreightTruck
                | TransportMode::FreightRail
                | TransportMode::FreightShip
                | TransportMode::FreightAir
        )
    }

    /// Modes subject to peak-hour surge pricing.
    pub fn is_on_demand(self) -> bool {
        matches!(self, TransportMode::Rideshare | TransportMode::Taxi)
    }

    /// Modes whose cost can be split between passengers.
    pub fn supports_pooling(self) -> bool {
        matches!(self, TransportMode::Car | TransportMode::Rideshare)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Walk => "walk",
            TransportMode::Bike => "bike",
            TransportMode::Bus => "bus",
            TransportMode::Train => "train",
            TransportMode::Subway => "subway",
            TransportMode::Tram => "tram",
            TransportMode::Car => "car",
            TransportMode::CarElectric => "carElectric",
            TransportMode::CarHybrid => "carHybrid",
            TransportMode::Rideshare => "rideshare",
            TransportMode::RidesharePool => "ridesharePool",
            TransportMode::Taxi => "taxi",
            TransportMode::FreightTruck => "freightTruck",
            TransportMode::FreightRail => "freightRail",
            TransportMode::FreightShip => "freightShip",
            TransportMode::FreightAir => "freightAir",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransportMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownMode(s.to_string()))
    }
}
