use serde::{Deserialize, Serialize};
use validator::Validate;

/// Battery and tariff parameters for a single optimisation call.
///
/// The optimiser itself does not validate these. An inverted SOC window
/// (`min_soc_pct >= max_soc_pct`) is left to the solver, which reports it as
/// infeasible. Non-finite values are rejected as a configuration error before
/// any model is built. Callers that want early rejection of other nonsense
/// (negative capacity, percentages outside 0..=100) can run
/// [`Validate::validate`] first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct BatteryConfig {
    /// Usable capacity (kWh)
    #[validate(range(exclusive_min = 0.0))]
    pub capacity_kwh: f64,
    /// State of charge at the start of the horizon (%)
    #[validate(range(min = 0.0, max = 100.0))]
    pub initial_soc_pct: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub min_soc_pct: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub max_soc_pct: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub charge_power_kw: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub discharge_power_kw: f64,
    /// Flat export price (pence/kWh)
    pub export_price_pence: f64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            capacity_kwh: 15.0,
            initial_soc_pct: 50.0,
            min_soc_pct: 20.0,
            max_soc_pct: 90.0,
            charge_power_kw: 3.0,
            discharge_power_kw: 3.0,
            export_price_pence: 15.0,
        }
    }
}

impl BatteryConfig {
    pub fn soc_min_kwh(&self) -> f64 {
        self.min_soc_pct / 100.0 * self.capacity_kwh
    }

    pub fn soc_max_kwh(&self) -> f64 {
        self.max_soc_pct / 100.0 * self.capacity_kwh
    }

    pub fn soc_initial_kwh(&self) -> f64 {
        self.initial_soc_pct / 100.0 * self.capacity_kwh
    }

    /// Export price in pounds per kWh
    pub fn export_price_gbp(&self) -> f64 {
        self.export_price_pence / 100.0
    }

    /// Names of parameters holding NaN or an infinity
    pub fn non_finite_fields(&self) -> Vec<&'static str> {
        [
            ("capacity_kwh", self.capacity_kwh),
            ("initial_soc_pct", self.initial_soc_pct),
            ("min_soc_pct", self.min_soc_pct),
            ("max_soc_pct", self.max_soc_pct),
            ("charge_power_kw", self.charge_power_kw),
            ("discharge_power_kw", self.discharge_power_kw),
            ("export_price_pence", self.export_price_pence),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_finite())
        .map(|(name, _)| name)
        .collect()
    }
}
