use good_lp::{default_solver, ResolutionError, Solution, SolverModel};

use super::{DispatchError, DispatchModel};

/// Primal values of a solved dispatch problem, indexed by period
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedDispatch {
    pub charge: Vec<f64>,
    pub discharge: Vec<f64>,
    pub grid_import: Vec<f64>,
    pub grid_export: Vec<f64>,
    pub soc: Vec<f64>,
    /// Value of the full objective, including penalty and incentive terms
    pub objective: f64,
}

/// Solve the model with the bundled LP backend.
///
/// Anything short of an optimal solution is an error; no relaxation or retry
/// is attempted here.
pub fn solve(model: DispatchModel) -> Result<SolvedDispatch, DispatchError> {
    let DispatchModel {
        problem,
        objective,
        constraints,
        vars,
    } = model;

    let mut lp = problem.minimise(objective.clone()).using(default_solver);
    for c in constraints {
        lp = lp.with(c);
    }

    let solution = lp.solve().map_err(from_resolution_error)?;

    let values = |column: &[good_lp::Variable]| -> Vec<f64> {
        column.iter().map(|&v| solution.value(v)).collect()
    };

    let solved = SolvedDispatch {
        charge: values(&vars.charge),
        discharge: values(&vars.discharge),
        grid_import: values(&vars.grid_import),
        grid_export: values(&vars.grid_export),
        soc: values(&vars.soc),
        objective: solution.eval(objective),
    };

    if !solved.is_finite() {
        return Err(DispatchError::Solver(
            "solver reported optimal but returned non-finite values".to_string(),
        ));
    }
    Ok(solved)
}

impl SolvedDispatch {
    /// True when the objective and every primal value are finite numbers
    pub fn is_finite(&self) -> bool {
        self.objective.is_finite()
            && [
                &self.charge,
                &self.discharge,
                &self.grid_import,
                &self.grid_export,
                &self.soc,
            ]
            .iter()
            .all(|column| column.iter().all(|v| v.is_finite()))
    }
}

fn from_resolution_error(error: ResolutionError) -> DispatchError {
    match error {
        ResolutionError::Infeasible => DispatchError::Infeasible(error.to_string()),
        ResolutionError::Unbounded => DispatchError::Solver(format!("unbounded: {error}")),
        other => DispatchError::Solver(other.to_string()),
    }
}
