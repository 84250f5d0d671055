//! Linear program for half-hourly battery dispatch.
//!
//! Every period `t` carries five decision variables, all in kWh:
//! - `charge[t]`, `discharge[t]`: energy into / out of the battery
//! - `grid_import[t]`, `grid_export[t]`: energy bought from / sold to the grid
//! - `soc[t]`: stored energy at the end of the period
//!
//! The formulation is lossless (1:1 charge and discharge) and the grid
//! connection shares the battery's per-period energy caps. Charging and
//! discharging in the same period is not ruled out by the model; the result
//! shaper collapses both to a net direction for display.

use good_lp::{constraint, variable, Constraint, Expression, ProblemVariables, Variable};
use ordered_float::OrderedFloat;

use super::{ObjectiveWeights, PERIOD_HOURS};
use crate::domain::{BatteryConfig, NormalisedSeries};

/// Variable handles, indexed by period
#[derive(Debug, Clone)]
pub struct DispatchVariables {
    pub charge: Vec<Variable>,
    pub discharge: Vec<Variable>,
    pub grid_import: Vec<Variable>,
    pub grid_export: Vec<Variable>,
    pub soc: Vec<Variable>,
}

/// A fully built, not yet solved dispatch problem.
pub struct DispatchModel {
    pub(crate) problem: ProblemVariables,
    pub(crate) objective: Expression,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) vars: DispatchVariables,
}

impl DispatchModel {
    pub fn build(
        series: &NormalisedSeries,
        battery: &BatteryConfig,
        weights: &ObjectiveWeights,
    ) -> Self {
        let n = series.len();

        let max_charge_energy = battery.charge_power_kw * PERIOD_HOURS;
        let max_discharge_energy = battery.discharge_power_kw * PERIOD_HOURS;
        let soc_min = battery.soc_min_kwh();
        let soc_max = battery.soc_max_kwh();
        let soc_init = battery.soc_initial_kwh();

        let import_prices = series.import_prices_gbp();
        let export_price = battery.export_price_gbp();
        let max_import_price = import_prices
            .iter()
            .copied()
            .map(OrderedFloat)
            .max()
            .map_or(0.0, |p| p.0);

        // Power and grid caps are expressed as variable bounds. The grid
        // connection reuses the battery limits.
        let mut problem = ProblemVariables::new();
        let vars = DispatchVariables {
            charge: problem.add_vector(variable().min(0.0).max(max_charge_energy), n),
            discharge: problem.add_vector(variable().min(0.0).max(max_discharge_energy), n),
            grid_import: problem.add_vector(variable().min(0.0).max(max_charge_energy), n),
            grid_export: problem.add_vector(variable().min(0.0).max(max_discharge_energy), n),
            soc: problem.add_vector(variable(), n),
        };

        let DispatchVariables {
            charge,
            discharge,
            grid_import,
            grid_export,
            soc,
        } = &vars;

        let mut constraints = Vec::with_capacity(n * 4);
        for (t, period) in series.periods.iter().enumerate() {
            if t == 0 {
                constraints.push(constraint!(soc[0] == soc_init + charge[0] - discharge[0]));
            } else {
                constraints.push(constraint!(soc[t] == soc[t - 1] + charge[t] - discharge[t]));
            }

            constraints.push(constraint!(soc[t] >= soc_min));
            constraints.push(constraint!(soc[t] <= soc_max));

            // Supply meets demand exactly
            constraints.push(constraint!(
                period.pv_estimate + discharge[t] + grid_import[t]
                    == period.demand + charge[t] + grid_export[t]
            ));
        }

        let base_cost: Expression = (0..n)
            .map(|t| grid_import[t] * import_prices[t] - grid_export[t] * export_price)
            .sum();

        let churn_penalty: Expression = (0..n)
            .map(|t| (grid_import[t] + grid_export[t]) * weights.grid_churn_penalty)
            .sum();

        let foresight: Expression = (0..n)
            .map(|t| charge[t] * (weights.foresight_weight * (max_import_price - import_prices[t])))
            .sum();

        let objective = base_cost + churn_penalty - foresight;

        Self {
            problem,
            objective,
            constraints,
            vars,
        }
    }

    pub fn n_periods(&self) -> usize {
        self.vars.soc.len()
    }

    pub fn n_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn variables(&self) -> &DispatchVariables {
        &self.vars
    }
}
