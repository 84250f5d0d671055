use serde::{Deserialize, Serialize};

/// Length of one dispatch period in hours. Inputs are assumed half-hourly.
pub const PERIOD_HOURS: f64 = 0.5;

/// Secondary objective terms added to the grid cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectiveWeights {
    /// Cost per kWh of any grid flow (£/kWh); breaks ties against needless import/export churn
    pub grid_churn_penalty: f64,
    /// Reward for charging in periods cheaper than the most expensive period of the horizon.
    /// Zero disables the look-ahead incentive.
    pub foresight_weight: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            grid_churn_penalty: 0.001,
            foresight_weight: 0.01,
        }
    }
}

impl ObjectiveWeights {
    /// Pure cost formulation without the charging incentive
    pub fn without_foresight() -> Self {
        Self {
            foresight_weight: 0.0,
            ..Self::default()
        }
    }
}
