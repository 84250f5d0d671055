use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One half-hour row of the joined forecast table.
///
/// Values are optional because the upstream joins are left joins: a period can
/// have a solar estimate but no price yet, or no matching demand slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    /// End of the half-hour period (UTC)
    pub period_end: DateTime<Utc>,
    /// Expected PV generation over the period (kWh)
    #[serde(default)]
    pub pv_estimate: Option<f64>,
    /// Import price (pence/kWh)
    #[serde(default)]
    pub price: Option<f64>,
    /// Household demand over the period (kWh)
    #[serde(default)]
    pub demand: Option<f64>,
}

impl InputRecord {
    pub fn new(
        period_end: DateTime<Utc>,
        pv_estimate: Option<f64>,
        price: Option<f64>,
        demand: Option<f64>,
    ) -> Self {
        Self {
            period_end,
            pv_estimate,
            price,
            demand,
        }
    }
}

/// Which value columns the joined table carries at all.
///
/// A column that is absent is different from a column full of gaps: absent
/// columns are not part of the completeness check during normalisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputColumns {
    pub price: bool,
    pub pv_estimate: bool,
    pub demand: bool,
}

impl Default for InputColumns {
    fn default() -> Self {
        Self {
            price: true,
            pv_estimate: true,
            demand: true,
        }
    }
}

impl InputColumns {
    pub fn none() -> Self {
        Self {
            price: false,
            pv_estimate: false,
            demand: false,
        }
    }

    pub fn any(&self) -> bool {
        self.price || self.pv_estimate || self.demand
    }
}

/// Joined time series handed to the optimiser. Need not be sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesInput {
    pub records: Vec<InputRecord>,
    #[serde(default)]
    pub columns: InputColumns,
}

impl TimeSeriesInput {
    pub fn new(records: Vec<InputRecord>) -> Self {
        Self {
            records,
            columns: InputColumns::default(),
        }
    }

    pub fn with_columns(records: Vec<InputRecord>, columns: InputColumns) -> Self {
        Self { records, columns }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A period that survived normalisation; every value is finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalisedPeriod {
    pub period_end: DateTime<Utc>,
    pub pv_estimate: f64,
    pub price: f64,
    pub demand: f64,
}

/// Cleaned, time-sorted series ready for model construction.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalisedSeries {
    pub periods: Vec<NormalisedPeriod>,
    /// Rows removed because a required value was missing or non-finite
    pub dropped: usize,
}

impl NormalisedSeries {
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Import prices converted from pence to pounds per kWh
    pub fn import_prices_gbp(&self) -> Vec<f64> {
        self.periods.iter().map(|p| p.price / 100.0).collect()
    }
}
