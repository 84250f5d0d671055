use thiserror::Error;

/// Failures of a single optimisation call. No partial plan is ever returned.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DispatchError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No data available for optimisation: {0}")]
    NoData(String),

    #[error("Optimisation infeasible: {0}")]
    Infeasible(String),

    #[error("Solver error: {0}")]
    Solver(String),
}

impl DispatchError {
    /// Short machine-readable kind, used in logs and responses
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::Configuration(_) => "ConfigurationError",
            DispatchError::NoData(_) => "NoDataError",
            DispatchError::Infeasible(_) => "InfeasibleError",
            DispatchError::Solver(_) => "SolverError",
        }
    }
}
