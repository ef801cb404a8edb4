use std::time::Duration;

use crate::domain::model::LinearModel;

/// Terminal status reported by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// Optimality proven (or any solution, when there is no objective).
    Optimal,
    /// A solution was found but optimality was not proven.
    Feasible,
    /// Proven that no assignment satisfies the model.
    Infeasible,
    /// Stopped without finding or excluding a solution.
    Unknown,
}

/// What a backend returns after running to completion or to its budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOutcome {
    pub status: EngineStatus,
    /// One value per model column, in column order. Only meaningful when the
    /// status is `Optimal` or `Feasible`.
    pub columns: Vec<i64>,
    /// Free-form engine diagnostics, echoed as `solution_info`.
    pub info: String,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The backend could not represent the model.
    #[error("{0}")]
    Build(String),

    /// The backend failed after the model was loaded.
    #[error("{0}")]
    Run(String),
}

/// Common interface for integer programming backends
pub trait Solver: Send + Sync {
    /// Load `model` into a fresh engine instance and solve it.
    ///
    /// # Arguments
    /// * `model` - The translated model; columns are addressed by index
    /// * `time_limit` - Wall-clock budget; `None` means the engine default
    fn solve(
        &self,
        model: &LinearModel,
        time_limit: Option<Duration>,
    ) -> Result<EngineOutcome, EngineError>;

    /// Get the solver name for logging/debugging
    fn name(&self) -> &str;
}
