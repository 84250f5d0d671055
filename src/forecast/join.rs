use std::collections::HashMap;

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{InputRecord, TimeSeriesInput};

pub const SLOTS_PER_DAY: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarPoint {
    pub period_end: DateTime<Utc>,
    /// Expected generation over the half hour (kWh)
    pub pv_estimate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub period_end: DateTime<Utc>,
    /// Import price (pence/kWh)
    pub price: f64,
}

/// Typical demand per half-hour-of-day slot (kWh), slot 0 ending at 00:00 UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandProfile {
    slots: Vec<Option<f64>>,
}

impl Default for DemandProfile {
    fn default() -> Self {
        Self {
            slots: vec![None; SLOTS_PER_DAY],
        }
    }
}

impl DemandProfile {
    /// Build from `(slot, kWh)` pairs; later pairs overwrite earlier ones.
    /// Slots outside `0..48` are ignored.
    pub fn from_slots(values: impl IntoIterator<Item = (usize, f64)>) -> Self {
        let mut profile = Self::default();
        for (slot, kwh) in values {
            if let Some(entry) = profile.slots.get_mut(slot) {
                *entry = Some(kwh);
            }
        }
        profile
    }

    /// Same demand in every slot
    pub fn flat(kwh: f64) -> Self {
        Self::from_slots((0..SLOTS_PER_DAY).map(|slot| (slot, kwh)))
    }

    pub fn demand_at(&self, period_end: DateTime<Utc>) -> Option<f64> {
        self.slots.get(half_hour_slot(period_end)).copied().flatten()
    }
}

/// Half-hour-of-day index of a timestamp: `hour * 2 + minute / 30`
pub fn half_hour_slot(t: DateTime<Utc>) -> usize {
    (t.hour() * 2 + t.minute() / 30) as usize
}

/// Join the three forecast feeds into one optimiser input.
///
/// The solar forecast defines the timeline. Prices attach on the exact period
/// end and demand on the half-hour-of-day slot; anything without a match is
/// left empty for normalisation to deal with.
pub fn join_inputs(
    solar: &[SolarPoint],
    prices: &[PricePoint],
    demand_profile: &DemandProfile,
) -> TimeSeriesInput {
    let price_by_period: HashMap<DateTime<Utc>, f64> =
        prices.iter().map(|p| (p.period_end, p.price)).collect();

    let records = solar
        .iter()
        .map(|s| {
            InputRecord::new(
                s.period_end,
                Some(s.pv_estimate),
                price_by_period.get(&s.period_end).copied(),
                demand_profile.demand_at(s.period_end),
            )
        })
        .collect();

    TimeSeriesInput::new(records)
}
