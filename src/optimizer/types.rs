use std::time::Instant;

use super::{normalise, shape, solve, DispatchError, DispatchModel, ObjectiveWeights};
use crate::domain::{BatteryConfig, DispatchPlan, TimeSeriesInput};

/// Cost-minimising battery scheduler.
///
/// Each call builds and solves a fresh model, so one optimizer can be shared
/// between threads without coordination.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DispatchOptimizer {
    pub weights: ObjectiveWeights,
}

impl DispatchOptimizer {
    pub fn new(weights: ObjectiveWeights) -> Self {
        Self { weights }
    }

    /// Normalise the inputs, solve the dispatch LP and shape the result.
    ///
    /// Blocks for the duration of the solve. Callers that need a deadline
    /// should run this on a blocking worker and time it out from outside.
    pub fn optimise(
        &self,
        input: &TimeSeriesInput,
        battery: &BatteryConfig,
    ) -> Result<DispatchPlan, DispatchError> {
        let non_finite = battery.non_finite_fields();
        if !non_finite.is_empty() {
            return Err(DispatchError::Configuration(format!(
                "Battery parameters must be finite: {}",
                non_finite.join(", ")
            )));
        }

        let series = normalise(input)?;
        let model = DispatchModel::build(&series, battery, &self.weights);

        let started = Instant::now();
        let solved = solve(model).inspect_err(|e| {
            tracing::warn!(kind = e.kind(), error = %e, periods = series.len(), "dispatch solve failed");
        })?;
        let solve_ms = started.elapsed().as_millis() as u64;

        let plan = shape(&series, battery, &solved);
        tracing::info!(
            periods = plan.len(),
            dropped = series.dropped,
            solve_ms,
            objective = solved.objective,
            total_cost_gbp = plan.total_cost_gbp(),
            "dispatch plan optimised"
        );
        Ok(plan)
    }
}
