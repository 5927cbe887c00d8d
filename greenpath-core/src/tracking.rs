//! Commute history, carbon credit balance and the persistence boundary.
//!
//! Session state is an explicitly owned struct mutated through update
//! functions; persistence is an explicit load/save step against a
//! key-value store. Concurrent writers are last-write-wins, which is
//! acceptable for a single-user session.

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::estimate;
use crate::model::{PreferenceWeights, TransportMode};

pub const KEY_CREDITS: &str = "carbon_credits";
pub const KEY_TOTAL_SAVED: &str = "total_saved_grams";
pub const KEY_COMMUTES: &str = "commute_entries";

/// One recorded trip; append-only, never individually edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommuteEntry {
    pub date: NaiveDate,
    pub mode: TransportMode,
    pub distance_km: f64,
    pub emissions_grams: f64,
}

/// Cumulative credit balance, monotone non-decreasing under normal use.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CarbonCreditBalance {
    pub credits: u64,
    pub total_saved_grams: f64,
}

impl CarbonCreditBalance {
    /// 100 credits per level, starting at level 1.
    pub fn level(&self) -> u64 {
        self.credits / 100 + 1
    }

    pub fn credits_into_level(&self) -> u64 {
        self.credits % 100
    }
}

/// A rewards milestone.
#[derive(Debug, Clone, Serialize)]
pub struct Achievement {
    pub name: &'static str,
    pub credits_required: u64,
    pub unlocked: bool,
}

pub fn achievements(credits: u64) -> Vec<Achievement> {
    const MILESTONES: [(&str, u64); 4] = [
        ("Green Beginner", 100),
        ("Eco Warrior", 250),
        ("Carbon Champion", 500),
        ("Planet Protector", 1000),
    ];
    MILESTONES
        .into_iter()
        .map(|(name, required)| Achievement {
            name,
            credits_required: required,
            unlocked: credits >= required,
        })
        .collect()
}

/// All mutable per-session state.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub preferences: PreferenceWeights,
    pub balance: CarbonCreditBalance,
    pub history: Vec<CommuteEntry>,
}

/// Aggregate statistics over the commute history.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CommuteTotals {
    pub trips: usize,
    pub total_km: f64,
    pub total_emissions_grams: f64,
    /// Versus an all-car baseline over the same distances.
    pub total_saved_grams: f64,
}

impl SessionState {
    /// Records a completed trip: appends to the history and credits the
    /// savings versus the car baseline. Returns the credits earned.
    pub fn record_trip(&mut self, mode: TransportMode, distance_km: f64, date: NaiveDate) -> u64 {
        let emissions = estimate::emissions(mode, distance_km);
        let saved = estimate::savings(mode, distance_km, TransportMode::Car);

        self.history.push(CommuteEntry {
            date,
            mode,
            distance_km,
            emissions_grams: emissions,
        });

        let previous_credits = self.balance.credits;
        self.balance.total_saved_grams += saved;
        self.balance.credits = estimate::carbon_credits(self.balance.total_saved_grams);
        self.balance.credits - previous_credits
    }

    pub fn totals(&self) -> CommuteTotals {
        let total_emissions: f64 = self.history.iter().map(|e| e.emissions_grams).sum();
        let baseline: f64 = self
            .history
            .iter()
            .map(|e| estimate::emissions(TransportMode::Car, e.distance_km))
            .sum();
        CommuteTotals {
            trips: self.history.len(),
            total_km: self.history.iter().map(|e| e.distance_km).sum(),
            total_emissions_grams: total_emissions,
            total_saved_grams: (baseline - total_emissions).max(0.0),
        }
    }
}

/// Persistence boundary for session aggregates. Implementations provide
/// plain string get/set; values are JSON-serialized here.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;
}

/// Loads session state, falling back to the demo seed on first run so the
/// tracker and rewards views are never empty.
pub fn load_session(store: &dyn KeyValueStore) -> Result<SessionState, Error> {
    let credits = store.get(KEY_CREDITS)?;
    let saved = store.get(KEY_TOTAL_SAVED)?;

    let balance = match (credits, saved) {
        (Some(credits), Some(saved)) => CarbonCreditBalance {
            credits: credits
                .parse()
                .map_err(|_| Error::Storage(format!("bad {KEY_CREDITS} value: {credits}")))?,
            total_saved_grams: saved
                .parse()
                .map_err(|_| Error::Storage(format!("bad {KEY_TOTAL_SAVED} value: {saved}")))?,
        },
        _ => {
            debug!("no persisted balance, seeding demo data");
            demo_balance()
        }
    };

    let history = match store.get(KEY_COMMUTES)? {
        Some(raw) => serde_json::from_str(&raw)?,
        None => demo_history(),
    };

    Ok(SessionState {
        preferences: PreferenceWeights::default(),
        balance,
        history,
    })
}

pub fn save_session(store: &mut dyn KeyValueStore, state: &SessionState) -> Result<(), Error> {
    store.set(KEY_CREDITS, &state.balance.credits.to_string())?;
    store.set(KEY_TOTAL_SAVED, &state.balance.total_saved_grams.to_string())?;
    store.set(KEY_COMMUTES, &serde_json::to_string(&state.history)?)?;
    Ok(())
}

fn demo_balance() -> CarbonCreditBalance {
    let total_saved_grams = 24_700.0;
    CarbonCreditBalance {
        credits: estimate::carbon_credits(total_saved_grams),
        total_saved_grams,
    }
}

fn demo_history() -> Vec<CommuteEntry> {
    let seed = [
        (2024, 1, 15, TransportMode::Bike, 5.2),
        (2024, 1, 14, TransportMode::Bus, 8.3),
        (2024, 1, 13, TransportMode::Walk, 2.1),
        (2024, 1, 12, TransportMode::Car, 8.3),
        (2024, 1, 11, TransportMode::Bike, 5.2),
    ];
    seed.into_iter()
        .map(|(y, m, d, mode, distance_km)| CommuteEntry {
            date: NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date"),
            mode,
            distance_km,
            emissions_grams: estimate::emissions(mode, distance_km),
        })
        .collect()
}
