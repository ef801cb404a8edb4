use std::collections::HashMap;

use crate::domain::model::LinearModel;
use crate::domain::solver::EngineError;
use crate::models::Operator;

use glpk_rust::{
    Bound, IntegerSparseMatrix as GlpkMatrix, SparseLEIntegerPolyhedron as GlpkPoly,
    Variable as GlpkVar,
};

/// GLPK rows in `A x <= b` form, before they are handed to the library.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LeRows {
    pub rows: Vec<i32>,
    pub cols: Vec<i32>,
    pub vals: Vec<i32>,
    pub b: Vec<i32>,
}

impl LeRows {
    fn push(&mut self, coefficients: &[(usize, i32)], rhs: i32) {
        let row = self.b.len() as i32;
        for &(col, val) in coefficients {
            self.rows.push(row);
            self.cols.push(col as i32);
            self.vals.push(val);
        }
        self.b.push(rhs);
    }
}

fn to_i32(value: i64, what: impl FnOnce() -> String) -> Result<i32, EngineError> {
    i32::try_from(value).map_err(|_| {
        EngineError::Build(format!("{} = {} is outside GLPK's 32-bit range", what(), value))
    })
}

/// Rewrite the model's rows as `<=` rows: `>=` rows are negated and `==` rows
/// become a `<=` / `>=` pair. A model without rows gets one vacuous row, as
/// GLPK will not load an empty matrix.
pub fn to_le_rows(model: &LinearModel) -> Result<LeRows, EngineError> {
    let mut le = LeRows::default();

    for row in &model.rows {
        let coefficients = row
            .coefficients
            .iter()
            .map(|&(col, coeff)| {
                to_i32(coeff, || format!("coefficient of {} in {}", model.columns[col].name, row.name))
                    .map(|c| (col, c))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let rhs = to_i32(row.rhs, || format!("rhs of {}", row.name))?;

        let negated = || -> Result<(Vec<(usize, i32)>, i32), EngineError> {
            let coefficients = coefficients
                .iter()
                .map(|&(col, c)| {
                    c.checked_neg()
                        .map(|n| (col, n))
                        .ok_or_else(|| EngineError::Build(format!("coefficient in {} cannot be negated in 32 bits", row.name)))
                })
                .collect::<Result<Vec<_>, _>>()?;
            let rhs = rhs
                .checked_neg()
                .ok_or_else(|| EngineError::Build(format!("rhs of {} cannot be negated in 32 bits", row.name)))?;
            Ok((coefficients, rhs))
        };

        match row.op {
            Operator::Le => le.push(&coefficients, rhs),
            Operator::Ge => {
                let (coefficients, rhs) = negated()?;
                le.push(&coefficients, rhs);
            }
            Operator::Eq => {
                le.push(&coefficients, rhs);
                let (coefficients, rhs) = negated()?;
                le.push(&coefficients, rhs);
            }
        }
    }

    if le.b.is_empty() {
        let anchor: &[(usize, i32)] = if model.columns.is_empty() { &[] } else { &[(0, 0)] };
        le.push(anchor, 0);
    }

    Ok(le)
}

/// Build a borrowed GLPK polyhedron; variable ids borrow the model's column names.
pub fn to_glpk_polyhedron<'a>(
    model: &'a LinearModel,
    le: &LeRows,
) -> Result<GlpkPoly<'a>, EngineError> {
    let variables: Vec<GlpkVar<'a>> = model
        .columns
        .iter()
        .map(|c| {
            let bound: Bound = (
                to_i32(c.lower, || format!("lower bound of {}", c.name))?,
                to_i32(c.upper, || format!("upper bound of {}", c.name))?,
            );
            Ok(GlpkVar {
                id: c.name.as_str(),
                bound,
            })
        })
        .collect::<Result<_, EngineError>>()?;

    let b: Vec<Bound> = le.b.iter().map(|&v| (0, v)).collect();

    Ok(GlpkPoly {
        a: GlpkMatrix {
            rows: le.rows.clone(),
            cols: le.cols.clone(),
            vals: le.vals.clone(),
        },
        b,
        variables,
        double_bound: false,
    })
}

/// Objective keyed by column name. Without an objective every coefficient is
/// zero, so any feasible point is optimal.
pub fn to_borrowed_objective(model: &LinearModel) -> HashMap<&str, f64> {
    let mut objective: HashMap<&str, f64> = model
        .columns
        .iter()
        .map(|c| (c.name.as_str(), 0.0))
        .collect();
    if let Some(obj) = &model.objective {
        for &(col, coeff) in &obj.coefficients {
            objective.insert(model.columns[col].name.as_str(), coeff as f64);
        }
    }
    objective
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Column, LinearObjective, Row};
    use crate::models::ObjectiveSense;

    fn model(rows: Vec<Row>) -> LinearModel {
        LinearModel {
            columns: vec![
                Column { name: "x".into(), lower: 0, upper: 10, boolean: false },
                Column { name: "y".into(), lower: 0, upper: 1, boolean: true },
            ],
            rows,
            objective: None,
        }
    }

    fn row(op: Operator, rhs: i64) -> Row {
        Row {
            name: "r".into(),
            coefficients: vec![(0, 2), (1, -3)],
            op,
            rhs,
        }
    }

    #[test]
    fn test_ge_row_is_negated() {
        let le = to_le_rows(&model(vec![row(Operator::Ge, 4)])).unwrap();
        assert_eq!(
            le,
            LeRows { rows: vec![0, 0], cols: vec![0, 1], vals: vec![-2, 3], b: vec![-4] }
        );
    }

    #[test]
    fn test_eq_row_becomes_pair() {
        let le = to_le_rows(&model(vec![row(Operator::Le, 1), row(Operator::Eq, 5)])).unwrap();
        assert_eq!(le.b, vec![1, 5, -5]);
        assert_eq!(le.rows, vec![0, 0, 1, 1, 2, 2]);
        assert_eq!(le.vals, vec![2, -3, 2, -3, -2, 3]);
    }

    #[test]
    fn test_model_without_rows_gets_vacuous_row() {
        let le = to_le_rows(&model(vec![])).unwrap();
        assert_eq!(le, LeRows { rows: vec![0], cols: vec![0], vals: vec![0], b: vec![0] });
    }

    #[test]
    fn test_values_beyond_32_bits_are_build_errors() {
        let mut big = row(Operator::Le, 1);
        big.coefficients = vec![(0, i64::from(i32::MAX) + 1)];
        assert!(matches!(to_le_rows(&model(vec![big])), Err(EngineError::Build(_))));

        assert!(matches!(
            to_le_rows(&model(vec![row(Operator::Ge, i64::from(i32::MIN))])),
            Err(EngineError::Build(_))
        ));

        let mut m = model(vec![]);
        m.columns[0].upper = i64::MAX;
        let le = to_le_rows(&m).unwrap();
        assert!(to_glpk_polyhedron(&m, &le).is_err());
    }

    #[test]
    fn test_objective_covers_every_column() {
        let mut m = model(vec![]);
        assert_eq!(to_borrowed_objective(&m), HashMap::from([("x", 0.0), ("y", 0.0)]));

        m.objective = Some(LinearObjective {
            sense: ObjectiveSense::Maximize,
            coefficients: vec![(1, 4)],
        });
        assert_eq!(to_borrowed_objective(&m), HashMap::from([("x", 0.0), ("y", 4.0)]));
    }
}
