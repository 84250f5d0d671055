//! Calling layer around the optimiser: validation, deadline and response shape.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::Config,
    domain::{BatteryConfig, DispatchPlan, PlanSummary, TimeSeriesInput},
    optimizer::{DispatchError, DispatchOptimizer},
};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Optimisation failed: {0}")]
    Rejected(#[from] DispatchError),

    #[error("Invalid battery configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error("Optimisation exceeded deadline of {0:?}")]
    Timeout(Duration),

    #[error("Optimisation worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ServiceError {
    /// Whether the failure is down to the request rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, ServiceError::Rejected(_) | ServiceError::Invalid(_))
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ServiceError::Rejected(e) => e.kind(),
            ServiceError::Invalid(_) => "ValidationError",
            ServiceError::Timeout(_) => "Timeout",
            ServiceError::Join(_) => "InternalError",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchResponse {
    pub id: Uuid,
    pub status: String,
    pub generated_at: DateTime<Utc>,
    pub summary: PlanSummary,
    pub schedule: DispatchPlan,
}

impl DispatchResponse {
    pub fn success(plan: DispatchPlan) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: "success".to_string(),
            generated_at: Utc::now(),
            summary: plan.summary(),
            schedule: plan,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DispatchService {
    optimizer: DispatchOptimizer,
    solve_timeout: Duration,
}

impl DispatchService {
    pub fn new(cfg: &Config) -> Self {
        Self {
            optimizer: DispatchOptimizer::new(cfg.objective),
            solve_timeout: cfg.run.solve_timeout(),
        }
    }

    pub fn with_timeout(mut self, solve_timeout: Duration) -> Self {
        self.solve_timeout = solve_timeout;
        self
    }

    /// Optimise on a blocking worker under the configured deadline.
    ///
    /// On timeout the worker is detached and its result discarded.
    pub async fn run(
        &self,
        input: TimeSeriesInput,
        battery: BatteryConfig,
    ) -> Result<DispatchResponse, ServiceError> {
        battery.validate()?;

        let optimizer = self.optimizer;
        let periods = input.len();
        let plan = run_blocking_with_deadline(self.solve_timeout, periods, move || {
            optimizer.optimise(&input, &battery)
        })
        .await?;

        Ok(DispatchResponse::success(plan))
    }
}

/// Run `job` on the blocking pool and give up on it once `deadline` passes.
async fn run_blocking_with_deadline<T, F>(
    deadline: Duration,
    periods: usize,
    job: F,
) -> Result<T, ServiceError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, DispatchError> + Send + 'static,
{
    let worker = tokio::task::spawn_blocking(job);

    match tokio::time::timeout(deadline, worker).await {
        Ok(joined) => Ok(joined??),
        Err(_) => {
            tracing::error!(periods, timeout = ?deadline, "dispatch optimisation timed out");
            Err(ServiceError::Timeout(deadline))
        }
    }
}
