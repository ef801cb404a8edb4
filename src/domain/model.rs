use crate::models::{ObjectiveSense, Operator};

/// Magnitude used for integer variables declared without a bound.
///
/// Kept at 2^31 - 1 so every backend can represent it exactly, including
/// GLPK's 32-bit bounds and HiGHS's doubles, and so a bounded sum of such
/// variables never overflows 128-bit accumulation.
pub const DEFAULT_INTEGER_BOUND: i64 = i32::MAX as i64;

/// A decision variable after translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub lower: i64,
    pub upper: i64,
    pub boolean: bool,
}

/// A posted constraint. Coefficients are keyed by column index, merged and
/// free of zeros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub name: String,
    pub coefficients: Vec<(usize, i64)>,
    pub op: Operator,
    pub rhs: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearObjective {
    pub sense: ObjectiveSense,
    pub coefficients: Vec<(usize, i64)>,
}

/// Engine-neutral integer linear model produced by the translator and handed
/// to a [`Solver`](crate::domain::solver::Solver) backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearModel {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    pub objective: Option<LinearObjective>,
}

impl LinearModel {
    /// Weighted sum of `coefficients` under `values`.
    pub fn evaluate(coefficients: &[(usize, i64)], values: &[i64]) -> i128 {
        coefficients
            .iter()
            .map(|&(col, coeff)| coeff as i128 * values.get(col).copied().unwrap_or(0) as i128)
            .sum()
    }

    /// Verify an assignment (one value per column) against bounds and rows.
    pub fn check(&self, values: &[i64]) -> Result<(), String> {
        if values.len() != self.columns.len() {
            return Err(format!(
                "expected {} values, got {}",
                self.columns.len(),
                values.len()
            ));
        }

        for (column, &value) in self.columns.iter().zip(values) {
            if value < column.lower || value > column.upper {
                return Err(format!(
                    "variable {} = {} outside [{}, {}]",
                    column.name, value, column.lower, column.upper
                ));
            }
        }

        for row in &self.rows {
            let lhs = Self::evaluate(&row.coefficients, values);
            if !row.op.holds(lhs, row.rhs as i128) {
                return Err(format!(
                    "constraint {} violated: {} {} {}",
                    row.name,
                    lhs,
                    row.op.symbol(),
                    row.rhs
                ));
            }
        }

        Ok(())
    }

    /// Objective value of an assignment, saturated into i64.
    pub fn objective_value(&self, values: &[i64]) -> Option<i64> {
        self.objective.as_ref().map(|objective| {
            let value = Self::evaluate(&objective.coefficients, values);
            i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
        })
    }
}
