use std::ffi::CString;
use std::time::Duration;

use crate::domain::model::LinearModel;
use crate::domain::solver::{EngineError, EngineOutcome, EngineStatus, Solver};
use crate::models::{ObjectiveSense, Operator};

use ::highs::{Col, HighsModelStatus, RowProblem, Sense, SolvedModel};
use highs_sys::{
    HighsInt, Highs_getIntInfoValue, Highs_getModelStatus, MODEL_STATUS_INFEASIBLE,
    MODEL_STATUS_MODEL_EMPTY, MODEL_STATUS_OBJECTIVE_BOUND, MODEL_STATUS_OBJECTIVE_TARGET,
    MODEL_STATUS_OPTIMAL, MODEL_STATUS_REACHED_INTERRUPT, MODEL_STATUS_REACHED_ITERATION_LIMIT,
    MODEL_STATUS_REACHED_MEMORY_LIMIT, MODEL_STATUS_REACHED_SOLUTION_LIMIT,
    MODEL_STATUS_REACHED_TIME_LIMIT, SOLUTION_STATUS_FEASIBLE, STATUS_ERROR,
};

/// Largest magnitude HiGHS (doubles) represents exactly.
const MAX_EXACT: u64 = 1 << 53;

/// HiGHS refuses matrix entries at or above `large_matrix_value` (1e15).
const MAX_MATRIX_VALUE: u64 = 999_999_999_999_999;

/// HiGHS solver implementation
pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        HighsSolver
    }

    /// Convert a raw HiGHS model status to an engine status. Runs stopped by
    /// a limit are `Feasible` only when HiGHS holds a feasible incumbent.
    fn convert_status(model_status: HighsInt, has_incumbent: bool) -> EngineStatus {
        match model_status {
            MODEL_STATUS_OPTIMAL | MODEL_STATUS_MODEL_EMPTY => EngineStatus::Optimal,
            MODEL_STATUS_INFEASIBLE => EngineStatus::Infeasible,
            MODEL_STATUS_OBJECTIVE_BOUND
            | MODEL_STATUS_OBJECTIVE_TARGET
            | MODEL_STATUS_REACHED_TIME_LIMIT
            | MODEL_STATUS_REACHED_ITERATION_LIMIT
            | MODEL_STATUS_REACHED_SOLUTION_LIMIT
            | MODEL_STATUS_REACHED_INTERRUPT
            | MODEL_STATUS_REACHED_MEMORY_LIMIT
                if has_incumbent =>
            {
                EngineStatus::Feasible
            }
            _ => EngineStatus::Unknown,
        }
    }

    /// The highs crate has no variant for statuses 16 to 18.
    fn status_label(model_status: HighsInt) -> String {
        match model_status {
            MODEL_STATUS_REACHED_SOLUTION_LIMIT => "ReachedSolutionLimit".to_string(),
            MODEL_STATUS_REACHED_INTERRUPT => "ReachedInterrupt".to_string(),
            MODEL_STATUS_REACHED_MEMORY_LIMIT => "ReachedMemoryLimit".to_string(),
            raw => HighsModelStatus::try_from(raw)
                .map(|status| format!("{:?}", status))
                .unwrap_or_else(|_| format!("model status {}", raw)),
        }
    }

    /// Read the model status without `SolvedModel::status`, which panics on
    /// statuses the highs crate does not know.
    fn model_status(solved: &SolvedModel) -> HighsInt {
        unsafe { Highs_getModelStatus(solved.as_ptr()) }
    }

    fn has_incumbent(solved: &SolvedModel) -> bool {
        let Ok(name) = CString::new("primal_solution_status") else {
            return false;
        };
        let mut value: HighsInt = -1;
        let status = unsafe { Highs_getIntInfoValue(solved.as_ptr(), name.as_ptr(), &mut value) };
        status != STATUS_ERROR && value == SOLUTION_STATUS_FEASIBLE
    }

    fn representable(
        value: i64,
        limit: u64,
        what: impl FnOnce() -> String,
    ) -> Result<f64, EngineError> {
        if value.unsigned_abs() > limit {
            return Err(EngineError::Build(format!(
                "{} = {} is out of range for HiGHS (|value| <= {})",
                what(),
                value,
                limit
            )));
        }
        Ok(value as f64)
    }

    fn exact(value: i64, what: impl FnOnce() -> String) -> Result<f64, EngineError> {
        Self::representable(value, MAX_EXACT, what)
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for HighsSolver {
    fn solve(
        &self,
        model: &LinearModel,
        time_limit: Option<Duration>,
    ) -> Result<EngineOutcome, EngineError> {
        let mut objective = vec![0.0; model.columns.len()];
        if let Some(obj) = &model.objective {
            for &(col, coeff) in &obj.coefficients {
                objective[col] = Self::exact(coeff, || {
                    format!("objective coefficient of {}", model.columns[col].name)
                })?;
            }
        }

        let mut problem = RowProblem::default();
        let mut cols: Vec<Col> = Vec::with_capacity(model.columns.len());
        for (column, &obj_coeff) in model.columns.iter().zip(&objective) {
            let lower = Self::exact(column.lower, || format!("lower bound of {}", column.name))?;
            let upper = Self::exact(column.upper, || format!("upper bound of {}", column.name))?;
            cols.push(problem.add_integer_column(obj_coeff, lower..=upper));
        }

        for row in &model.rows {
            let factors = row
                .coefficients
                .iter()
                .map(|&(col, coeff)| {
                    let what = || format!("coefficient of {} in {}", model.columns[col].name, row.name);
                    Self::representable(coeff, MAX_MATRIX_VALUE, what).map(|c| (cols[col], c))
                })
                .collect::<Result<Vec<_>, _>>()?;
            let rhs = Self::exact(row.rhs, || format!("rhs of {}", row.name))?;

            match row.op {
                Operator::Le => problem.add_row(..=rhs, &factors),
                Operator::Ge => problem.add_row(rhs.., &factors),
                Operator::Eq => problem.add_row(rhs..=rhs, &factors),
            }
        }

        let sense = match model.objective.as_ref().map(|o| o.sense) {
            Some(ObjectiveSense::Maximize) => Sense::Maximise,
            _ => Sense::Minimise,
        };

        let mut highs = problem
            .try_optimise(sense)
            .map_err(|status| EngineError::Build(format!("HiGHS rejected the model: {:?}", status)))?;
        highs.set_option("output_flag", false);
        // Optimal must mean proven optimal, not within the default MIP gap.
        highs.set_option("mip_rel_gap", 0.0);
        if let Some(limit) = time_limit {
            highs.set_option("time_limit", limit.as_secs_f64());
        }

        let solved = highs
            .try_solve()
            .map_err(|status| EngineError::Run(format!("HiGHS failed: {:?}", status)))?;

        let model_status = Self::model_status(&solved);
        let mut status = Self::convert_status(model_status, Self::has_incumbent(&solved));

        let columns: Vec<i64> = solved
            .get_solution()
            .columns()
            .iter()
            .map(|v| v.round() as i64)
            .collect();

        if status == EngineStatus::Feasible && model.check(&columns).is_err() {
            status = EngineStatus::Unknown;
        }

        Ok(EngineOutcome {
            status,
            columns,
            info: Self::status_label(model_status),
        })
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}
