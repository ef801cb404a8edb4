use std::time::Duration;

use crate::convert::{to_borrowed_objective, to_glpk_polyhedron, to_le_rows};
use crate::domain::model::LinearModel;
use crate::domain::solver::{EngineError, EngineOutcome, EngineStatus, Solver};
use crate::models::ObjectiveSense;

use glpk_rust::{solve_ilps as glpk_solve_ilps, Solution, Status as GlpkStatus};

const PRESOLVE: bool = true;
const NO_TERMINAL_OUTPUT: bool = false;

/// `glp_intopt` return code GLP_ENOPFS: the LP relaxation has no primal
/// feasible solution, so neither does the integer program.
const ENOPFS: &str = "code: 10";

/// GLPK solver implementation
pub struct GlpkSolver;

impl GlpkSolver {
    pub fn new() -> Self {
        GlpkSolver
    }

    fn convert_status(status: &GlpkStatus) -> (EngineStatus, &'static str) {
        match status {
            GlpkStatus::Optimal => (EngineStatus::Optimal, "optimal"),
            GlpkStatus::Feasible => (EngineStatus::Feasible, "feasible"),
            GlpkStatus::Infeasible => (EngineStatus::Infeasible, "infeasible"),
            GlpkStatus::NoFeasible => (EngineStatus::Infeasible, "no feasible solution"),
            GlpkStatus::Undefined => (EngineStatus::Unknown, "undefined"),
            GlpkStatus::Unbounded => (EngineStatus::Unknown, "unbounded"),
            GlpkStatus::SimplexFailed => (EngineStatus::Unknown, "simplex failed"),
            GlpkStatus::MIPFailed => (EngineStatus::Unknown, "MIP search failed"),
            GlpkStatus::EmptySpace => (EngineStatus::Unknown, "empty space"),
        }
    }

    fn classify(solution: &Solution) -> (EngineStatus, &'static str) {
        let relaxation_infeasible = solution.status == GlpkStatus::MIPFailed
            && solution.error.as_deref().is_some_and(|e| e.ends_with(ENOPFS));
        if relaxation_infeasible {
            return (EngineStatus::Infeasible, "LP relaxation infeasible");
        }
        Self::convert_status(&solution.status)
    }
}

impl Default for GlpkSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for GlpkSolver {
    fn solve(
        &self,
        model: &LinearModel,
        time_limit: Option<Duration>,
    ) -> Result<EngineOutcome, EngineError> {
        if let Some(limit) = time_limit {
            log::warn!(
                "GLPK backend has no time budget; ignoring time limit of {}s",
                limit.as_secs()
            );
        }

        let le = to_le_rows(model)?;
        let mut polyhedron = to_glpk_polyhedron(model, &le)?;
        let objective = to_borrowed_objective(model);
        let maximize = matches!(
            model.objective.as_ref().map(|o| o.sense),
            Some(ObjectiveSense::Maximize)
        );

        let solutions: Vec<Solution> = glpk_solve_ilps(
            &mut polyhedron,
            vec![objective],
            maximize,
            PRESOLVE,
            NO_TERMINAL_OUTPUT,
        );

        let solution = solutions
            .into_iter()
            .next()
            .ok_or_else(|| EngineError::Run("GLPK returned no solution".to_string()))?;

        let (status, label) = Self::classify(&solution);
        let columns = model
            .columns
            .iter()
            .map(|c| solution.solution.get(c.name.as_str()).copied().map(i64::from).unwrap_or(0))
            .collect();
        let info = match solution.error {
            Some(error) => format!("{} ({})", label, error),
            None => label.to_string(),
        };

        Ok(EngineOutcome {
            status,
            columns,
            info,
        })
    }

    fn name(&self) -> &str {
        "GLPK"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Column, LinearObjective, Row};
    use crate::models::Operator;

    fn column(name: &str, lower: i64, upper: i64) -> Column {
        Column { name: name.into(), lower, upper, boolean: false }
    }

    #[test]
    fn test_maximize_sum_under_cap() {
        let model = LinearModel {
            columns: vec![column("x", 0, 10), column("y", 0, 10)],
            rows: vec![Row {
                name: "cap".into(),
                coefficients: vec![(0, 1), (1, 1)],
                op: Operator::Le,
                rhs: 7,
            }],
            objective: Some(LinearObjective {
                sense: ObjectiveSense::Maximize,
                coefficients: vec![(0, 1), (1, 1)],
            }),
        };

        let outcome = GlpkSolver::new().solve(&model, None).unwrap();
        assert_eq!(outcome.status, EngineStatus::Optimal);
        assert_eq!(outcome.columns.iter().sum::<i64>(), 7);
    }

    #[test]
    fn test_equality_row() {
        let model = LinearModel {
            columns: vec![column("x", 0, 10)],
            rows: vec![Row {
                name: "pin".into(),
                coefficients: vec![(0, 2)],
                op: Operator::Eq,
                rhs: 6,
            }],
            objective: None,
        };

        let outcome = GlpkSolver::new().solve(&model, None).unwrap();
        assert_eq!(outcome.status, EngineStatus::Optimal);
        assert_eq!(outcome.columns, vec![3]);
    }

    #[test]
    fn test_contradictory_rows_are_infeasible() {
        let model = LinearModel {
            columns: vec![column("x", 0, 10)],
            rows: vec![
                Row { name: "low".into(), coefficients: vec![(0, 1)], op: Operator::Le, rhs: 5 },
                Row { name: "high".into(), coefficients: vec![(0, 1)], op: Operator::Ge, rhs: 8 },
            ],
            objective: None,
        };

        let outcome = GlpkSolver::new().solve(&model, None).unwrap();
        assert_eq!(outcome.status, EngineStatus::Infeasible);
    }

    fn failed(code: i32) -> Solution {
        Solution {
            status: GlpkStatus::MIPFailed,
            objective: 0.0,
            solution: Default::default(),
            error: Some(format!("GLPK MIP solver failed with code: {}", code)),
        }
    }

    #[test]
    fn test_classify_relaxation_infeasible_as_infeasible() {
        assert_eq!(GlpkSolver::classify(&failed(10)).0, EngineStatus::Infeasible);
        assert_eq!(GlpkSolver::classify(&failed(9)).0, EngineStatus::Unknown);
        assert_eq!(GlpkSolver::classify(&failed(100)).0, EngineStatus::Unknown);
    }

    #[test]
    fn test_solution_values_widen_to_i64() {
        let model = LinearModel {
            columns: vec![column("x", -3, -3), column("y", 0, 4)],
            rows: vec![Row {
                name: "y_max".into(),
                coefficients: vec![(1, 1)],
                op: Operator::Le,
                rhs: 4,
            }],
            objective: Some(LinearObjective {
                sense: ObjectiveSense::Maximize,
                coefficients: vec![(1, 1)],
            }),
        };

        let outcome = GlpkSolver::new().solve(&model, None).unwrap();
        assert_eq!(outcome.status, EngineStatus::Optimal);
        assert_eq!(outcome.columns, vec![-3_i64, 4]);
    }

    #[test]
    fn test_name() {
        assert_eq!(GlpkSolver::new().name(), "GLPK");
    }
}
