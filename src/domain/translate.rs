use std::collections::{BTreeMap, HashMap};

use crate::domain::model::{Column, LinearModel, LinearObjective, Row, DEFAULT_INTEGER_BOUND};
use crate::models::{Constraint, Objective, SolveRequest, Term, Variable, VariableKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslationError {
    #[error("Duplicate variable name: {0}")]
    DuplicateVariable(String),

    #[error("Variable {name} has an empty domain [{min}, {max}]")]
    EmptyDomain { name: String, min: i64, max: i64 },

    #[error("Constraint {constraint}: term {position} references undefined variable {var}")]
    UndefinedVariable {
        constraint: String,
        position: usize,
        var: String,
    },

    #[error("Objective: term {position} references undefined variable {var}")]
    UndefinedObjectiveVariable { position: usize, var: String },

    #[error("{context}: coefficient of {var} overflows a 64-bit integer")]
    CoefficientOverflow { context: String, var: String },

    #[error("Engine rejected the model: {0}")]
    Engine(String),
}

/// Per-call state for building a [`LinearModel`] out of a request.
///
/// A context is created for one request and dropped with it. It holds the
/// only name-to-column index used to resolve terms, and the trace of
/// constraints posted so far.
#[derive(Debug, Default)]
pub struct TranslationContext<'r> {
    index: HashMap<&'r str, usize>,
    model: LinearModel,
    added_constraints: Vec<String>,
}

impl<'r> TranslationContext<'r> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every build step in request order, stopping at the first failure.
    pub fn build(&mut self, request: &'r SolveRequest) -> Result<(), TranslationError> {
        for variable in &request.variables {
            self.declare_variable(variable)?;
        }
        for constraint in &request.constraints {
            self.post_constraint(constraint)?;
        }
        if let Some(objective) = &request.objective {
            self.set_objective(objective)?;
        }
        Ok(())
    }

    pub fn declare_variable(&mut self, variable: &'r Variable) -> Result<usize, TranslationError> {
        if self.index.contains_key(variable.name.as_str()) {
            return Err(TranslationError::DuplicateVariable(variable.name.clone()));
        }

        let column = match variable.kind {
            VariableKind::Boolean => Column {
                name: variable.name.clone(),
                lower: 0,
                upper: 1,
                boolean: true,
            },
            VariableKind::Integer => {
                let lower = variable.min.unwrap_or(-DEFAULT_INTEGER_BOUND);
                let upper = variable.max.unwrap_or(DEFAULT_INTEGER_BOUND);
                if lower > upper {
                    return Err(TranslationError::EmptyDomain {
                        name: variable.name.clone(),
                        min: lower,
                        max: upper,
                    });
                }
                Column {
                    name: variable.name.clone(),
                    lower,
                    upper,
                    boolean: false,
                }
            }
        };

        let id = self.model.columns.len();
        self.model.columns.push(column);
        self.index.insert(variable.name.as_str(), id);
        Ok(id)
    }

    pub fn post_constraint(&mut self, constraint: &Constraint) -> Result<(), TranslationError> {
        let context = format!("Constraint {}", constraint.name);
        let coefficients = self.resolve_terms(&constraint.terms, &context, |position, var| {
            TranslationError::UndefinedVariable {
                constraint: constraint.name.clone(),
                position,
                var: var.to_string(),
            }
        })?;

        self.model.rows.push(Row {
            name: constraint.name.clone(),
            coefficients,
            op: constraint.op,
            rhs: constraint.rhs,
        });
        self.added_constraints.push(constraint.name.clone());
        Ok(())
    }

    pub fn set_objective(&mut self, objective: &Objective) -> Result<(), TranslationError> {
        let coefficients = self.resolve_terms(&objective.terms, "Objective", |position, var| {
            TranslationError::UndefinedObjectiveVariable {
                position,
                var: var.to_string(),
            }
        })?;

        self.model.objective = Some(LinearObjective {
            sense: objective.sense,
            coefficients,
        });
        Ok(())
    }

    /// Resolve terms through the index, summing repeated variables.
    fn resolve_terms(
        &self,
        terms: &[Term],
        context: &str,
        undefined: impl Fn(usize, &str) -> TranslationError,
    ) -> Result<Vec<(usize, i64)>, TranslationError> {
        let mut merged: BTreeMap<usize, i64> = BTreeMap::new();
        for (position, term) in terms.iter().enumerate() {
            let &col = self
                .index
                .get(term.var.as_str())
                .ok_or_else(|| undefined(position, &term.var))?;
            let entry = merged.entry(col).or_insert(0);
            *entry = entry
                .checked_add(term.coeff)
                .ok_or_else(|| TranslationError::CoefficientOverflow {
                    context: context.to_string(),
                    var: term.var.clone(),
                })?;
        }
        Ok(merged.into_iter().filter(|&(_, coeff)| coeff != 0).collect())
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    pub fn added_constraints(&self) -> &[String] {
        &self.added_constraints
    }

    pub fn finish(self) -> (LinearModel, Vec<String>) {
        (self.model, self.added_constraints)
    }
}
