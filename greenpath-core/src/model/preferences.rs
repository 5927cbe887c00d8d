//! User preference weights over the three ranking criteria.

use serde::{Deserialize, Serialize};

use crate::Error;

/// The criterion a slider controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    Time,
    Cost,
    Emissions,
}

/// Three non-negative weights that always sum to exactly 100.
///
/// Mutation goes through [`PreferenceWeights::set`], which redistributes the
/// remaining budget over the other two weights proportionally to their
/// previous ratio. The sum-to-100 invariant is enforced exactly: one share
/// is rounded proportionally and the rounding remainder is assigned to the
/// larger share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceWeights {
    pub time: u32,
    pub cost: u32,
    pub emissions: u32,
}

impl Default for PreferenceWeights {
    fn default() -> Self {
        Self {
            time: 50,
            cost: 30,
            emissions: 20,
        }
    }
}

impl PreferenceWeights {
    pub fn new(time: u32, cost: u32, emissions: u32) -> Result<Self, Error> {
        let weights = Self {
            time,
            cost,
            emissions,
        };
        weights.validate()?;
        Ok(weights)
    }

    pub fn validate(&self) -> Result<(), Error> {
        // Widened sum: the fields come straight from query parameters and
        // may individually approach u32::MAX.
        let sum = u64::from(self.time) + u64::from(self.cost) + u64::from(self.emissions);
        if sum == 100 {
            Ok(())
        } else {
            Err(Error::InvalidWeights(sum))
        }
    }

    pub fn get(&self, criterion: Criterion) -> u32 {
        match criterion {
            Criterion::Time => self.time,
            Criterion::Cost => self.cost,
            Criterion::Emissions => self.emissions,
        }
    }

    /// Sets one weight and redistributes `100 - value` over the other two.
    ///
    /// When both other weights were zero the remainder is split evenly.
    pub fn set(&mut self, criterion: Criterion, value: u32) {
        let value = value.min(100);
        let remaining = 100 - value;

        let (first, second) = match criterion {
            Criterion::Time => (Criterion::Cost, Criterion::Emissions),
            Criterion::Cost => (Criterion::Time, Criterion::Emissions),
            Criterion::Emissions => (Criterion::Time, Criterion::Cost),
        };
        let prev_first = self.get(first);
        let prev_second = self.get(second);
        let other_total = prev_first + prev_second;

        // The smaller share is rounded proportionally; the larger share
        // takes the remainder, absorbing any rounding drift.
        let (smaller, larger, prev_smaller) = if prev_first <= prev_second {
            (first, second, prev_first)
        } else {
            (second, first, prev_second)
        };
        let smaller_share = if other_total > 0 {
            rounded_share(prev_smaller, other_total, remaining).min(remaining)
        } else {
            remaining / 2
        };

        *self.slot_mut(criterion) = value;
        *self.slot_mut(smaller) = smaller_share;
        *self.slot_mut(larger) = remaining - smaller_share;

        debug_assert_eq!(self.time + self.cost + self.emissions, 100);
    }

    fn slot_mut(&mut self, criterion: Criterion) -> &mut u32 {
        match criterion {
            Criterion::Time => &mut self.time,
            Criterion::Cost => &mut self.cost,
            Criterion::Emissions => &mut self.emissions,
        }
    }
}

/// `round(prev / other_total * remaining)` with integer arithmetic.
fn rounded_share(prev: u32, other_total: u32, remaining: u32) -> u32 {
    (prev * remaining + other_total / 2) / other_total
}
