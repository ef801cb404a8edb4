use std::collections::BTreeMap;
use std::time::Duration;

use crate::domain::model::LinearModel;
use crate::domain::solver::{EngineError, EngineOutcome, EngineStatus, Solver};
use crate::domain::translate::{TranslationContext, TranslationError};
use crate::models::{SolveRequest, SolveResult, SolveStatus};

/// Translate `request`, run it on `solver` and normalize the outcome.
///
/// Never fails: translation problems come back as `MODEL_INVALID` with the
/// constraints posted before the failure listed in `added_constraints`.
pub fn solve(request: &SolveRequest, solver: &dyn Solver) -> SolveResult {
    solve_with(request, solver, None)
}

/// Like [`solve`], using `fallback_time_limit` when the request sets none.
pub fn solve_with(
    request: &SolveRequest,
    solver: &dyn Solver,
    fallback_time_limit: Option<Duration>,
) -> SolveResult {
    let mut context = TranslationContext::new();
    if let Err(error) = context.build(request) {
        log::debug!("Translation failed: {}", error);
        let (_, added_constraints) = context.finish();
        return SolveResult::model_invalid(error.to_string(), added_constraints);
    }
    let (model, added_constraints) = context.finish();

    log::debug!("Variables: {}", model.columns.len());
    log::debug!("Constraints: {}", added_constraints.len());

    if model.columns.is_empty() {
        return solve_constant(&model, added_constraints);
    }

    let time_limit = request.time_limit().or(fallback_time_limit);

    match solver.solve(&model, time_limit) {
        Ok(outcome) => normalize(&model, outcome, solver.name(), added_constraints),
        Err(EngineError::Build(message)) => SolveResult::model_invalid(
            TranslationError::Engine(message).to_string(),
            added_constraints,
        ),
        Err(EngineError::Run(message)) => {
            log::warn!("{} failed while solving: {}", solver.name(), message);
            SolveResult {
                status: SolveStatus::Unknown,
                values: None,
                objective_value: None,
                solution_info: Some(format!("{}: {}", solver.name(), message)),
                added_constraints,
                error: None,
            }
        }
    }
}

/// Without decision variables every row is a constant comparison.
fn solve_constant(model: &LinearModel, added_constraints: Vec<String>) -> SolveResult {
    let (status, values, objective_value) = match model.check(&[]) {
        Ok(()) => (
            SolveStatus::Optimal,
            Some(BTreeMap::new()),
            model.objective_value(&[]),
        ),
        Err(_) => (SolveStatus::Infeasible, None, None),
    };

    SolveResult {
        status,
        values,
        objective_value,
        solution_info: Some("trivial model: no decision variables".to_string()),
        added_constraints,
        error: None,
    }
}

/// Map an engine outcome onto the response contract.
fn normalize(
    model: &LinearModel,
    outcome: EngineOutcome,
    solver_name: &str,
    added_constraints: Vec<String>,
) -> SolveResult {
    log::debug!("Solver status: {:?}", outcome.status);
    log::debug!("Solver solution info: {}", outcome.info);

    let mut status = match outcome.status {
        EngineStatus::Optimal => SolveStatus::Optimal,
        EngineStatus::Feasible => SolveStatus::Feasible,
        EngineStatus::Infeasible => SolveStatus::Infeasible,
        EngineStatus::Unknown => SolveStatus::Unknown,
    };
    let mut solution_info = format!("{}: {}", solver_name, outcome.info);

    if status.has_solution() {
        if let Err(reason) = model.check(&outcome.columns) {
            log::warn!("{} reported {:?} with an invalid assignment: {}", solver_name, status, reason);
            solution_info = format!("{} (assignment rejected: {})", solution_info, reason);
            status = SolveStatus::Unknown;
        }
    }

    let (values, objective_value) = if status.has_solution() {
        let values = model
            .columns
            .iter()
            .zip(&outcome.columns)
            .map(|(column, &value)| (column.name.clone(), value))
            .collect();
        (Some(values), model.objective_value(&outcome.columns))
    } else {
        (None, None)
    };

    SolveResult {
        status,
        values,
        objective_value,
        solution_info: Some(solution_info),
        added_constraints,
        error: None,
    }
}
