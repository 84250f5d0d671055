use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One half-hour of the optimised schedule.
///
/// `batt_charge_kwh`/`batt_discharge_kwh` and `grid_import_kwh`/`grid_export_kwh`
/// are display values: at most one of each pair is non-zero. The signed
/// `net_*` fields and `cost_gbp` come straight from the solved flows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DispatchPeriod {
    pub period_end: DateTime<Utc>,
    pub demand: f64,
    pub pv_estimate: f64,
    /// Import price (pence/kWh)
    pub price: f64,
    pub batt_charge_kwh: f64,
    pub batt_discharge_kwh: f64,
    pub grid_import_kwh: f64,
    pub grid_export_kwh: f64,
    pub soc_kwh: f64,
    pub soc_pct: f64,
    /// Positive when charging, negative when discharging
    pub net_battery_kwh: f64,
    /// Positive when importing, negative when exporting
    pub net_grid_kwh: f64,
    pub cost_gbp: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DispatchPlan {
    pub periods: Vec<DispatchPeriod>,
}

impl DispatchPlan {
    /// Column names of a serialised period, in output order
    pub const COLUMNS: [&'static str; 13] = [
        "period_end",
        "demand",
        "pv_estimate",
        "price",
        "batt_charge_kwh",
        "batt_discharge_kwh",
        "grid_import_kwh",
        "grid_export_kwh",
        "soc_kwh",
        "soc_pct",
        "net_battery_kwh",
        "net_grid_kwh",
        "cost_gbp",
    ];

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DispatchPeriod> {
        self.periods.iter()
    }

    pub fn total_cost_gbp(&self) -> f64 {
        self.periods.iter().map(|p| p.cost_gbp).sum()
    }

    pub fn summary(&self) -> PlanSummary {
        self.periods.iter().fold(PlanSummary::default(), |mut acc, p| {
            acc.total_cost_gbp += p.cost_gbp;
            acc.total_pv_kwh += p.pv_estimate;
            acc.total_demand_kwh += p.demand;
            acc.total_grid_import_kwh += p.grid_import_kwh;
            acc.total_grid_export_kwh += p.grid_export_kwh;
            acc
        })
    }
}

impl<'a> IntoIterator for &'a DispatchPlan {
    type Item = &'a DispatchPeriod;
    type IntoIter = std::slice::Iter<'a, DispatchPeriod>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.iter()
    }
}

/// Horizon totals reported next to the schedule
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub total_cost_gbp: f64,
    pub total_pv_kwh: f64,
    pub total_demand_kwh: f64,
    pub total_grid_import_kwh: f64,
    pub total_grid_export_kwh: f64,
}
