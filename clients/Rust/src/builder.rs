use std::collections::HashSet;

use crate::error::{ClientError, Result};
use crate::types::{
    Constraint, Objective, ObjectiveSense, Operator, SolveOptions, SolveRequest, Term, Variable,
    VariableKind,
};

/// Builder for constructing solve requests with a fluent API
#[derive(Debug, Default)]
pub struct ProblemBuilder {
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    objective: Option<Objective>,
    time_limit_seconds: Option<f64>,
}

fn terms<'a>(terms: impl IntoIterator<Item = (&'a str, i64)>) -> Vec<Term> {
    terms
        .into_iter()
        .map(|(var, coeff)| Term {
            var: var.to_string(),
            coeff,
        })
        .collect()
}

impl ProblemBuilder {
    /// Create a new problem builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a 0/1 decision variable
    pub fn bool_var(mut self, name: impl Into<String>) -> Self {
        self.variables.push(Variable {
            name: name.into(),
            kind: VariableKind::Boolean,
            min: None,
            max: None,
        });
        self
    }

    /// Add an integer decision variable with inclusive bounds
    ///
    /// # Example
    ///
    /// ```
    /// use milp_solve_sdk::ProblemBuilder;
    ///
    /// let builder = ProblemBuilder::new().int_var("x", 0, 100);
    /// ```
    pub fn int_var(mut self, name: impl Into<String>, min: i64, max: i64) -> Self {
        self.variables.push(Variable {
            name: name.into(),
            kind: VariableKind::Integer,
            min: Some(min),
            max: Some(max),
        });
        self
    }

    /// Add an integer decision variable with the server's default range
    pub fn free_int_var(mut self, name: impl Into<String>) -> Self {
        self.variables.push(Variable {
            name: name.into(),
            kind: VariableKind::Integer,
            min: None,
            max: None,
        });
        self
    }

    /// Add a named constraint: sum(coeff * var) op rhs
    ///
    /// # Example
    ///
    /// ```
    /// use milp_solve_sdk::{Operator, ProblemBuilder};
    ///
    /// // x + 2y <= 10
    /// let builder = ProblemBuilder::new()
    ///     .int_var("x", 0, 10)
    ///     .int_var("y", 0, 10)
    ///     .constraint("budget", [("x", 1), ("y", 2)], Operator::Le, 10);
    /// ```
    pub fn constraint<'a>(
        mut self,
        name: impl Into<String>,
        lhs: impl IntoIterator<Item = (&'a str, i64)>,
        op: Operator,
        rhs: i64,
    ) -> Self {
        self.constraints.push(Constraint {
            name: name.into(),
            terms: terms(lhs),
            op,
            rhs,
        });
        self
    }

    /// Minimize a linear objective, replacing any previous objective
    pub fn minimize<'a>(mut self, objective: impl IntoIterator<Item = (&'a str, i64)>) -> Self {
        self.objective = Some(Objective {
            sense: ObjectiveSense::Minimize,
            terms: terms(objective),
        });
        self
    }

    /// Maximize a linear objective, replacing any previous objective
    pub fn maximize<'a>(mut self, objective: impl IntoIterator<Item = (&'a str, i64)>) -> Self {
        self.objective = Some(Objective {
            sense: ObjectiveSense::Maximize,
            terms: terms(objective),
        });
        self
    }

    /// Set the solver's wall-clock budget in seconds
    pub fn time_limit(mut self, seconds: f64) -> Self {
        self.time_limit_seconds = Some(seconds);
        self
    }

    /// Build the solve request
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Two variables share a name
    /// - A term references a variable that was not added
    /// - An integer variable has min > max
    /// - The time limit is not a positive, finite number
    pub fn build(self) -> Result<SolveRequest> {
        let mut names: HashSet<&str> = HashSet::new();
        for variable in &self.variables {
            if !names.insert(variable.name.as_str()) {
                return Err(ClientError::InvalidRequest(format!(
                    "Duplicate variable name {}",
                    variable.name
                )));
            }
            if let (Some(min), Some(max)) = (variable.min, variable.max) {
                if min > max {
                    return Err(ClientError::InvalidRequest(format!(
                        "Variable {} has min {} > max {}",
                        variable.name, min, max
                    )));
                }
            }
        }

        let constraint_terms = self
            .constraints
            .iter()
            .flat_map(|c| c.terms.iter().map(move |t| (c.name.as_str(), t)));
        let objective_terms = self
            .objective
            .iter()
            .flat_map(|o| o.terms.iter().map(|t| ("objective", t)));
        for (owner, term) in constraint_terms.chain(objective_terms) {
            if !names.contains(term.var.as_str()) {
                return Err(ClientError::InvalidRequest(format!(
                    "{} references undeclared variable {}",
                    owner, term.var
                )));
            }
        }

        if let Some(secs) = self.time_limit_seconds.filter(|s| !(s.is_finite() && *s > 0.0)) {
            return Err(ClientError::InvalidRequest(format!(
                "Time limit must be positive, got {}",
                secs
            )));
        }

        Ok(SolveRequest {
            variables: self.variables,
            constraints: self.constraints,
            objective: self.objective,
            options: self.time_limit_seconds.map(|secs| SolveOptions {
                time_limit_seconds: Some(secs),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_valid_request() {
        let request = ProblemBuilder::new()
            .int_var("x", 0, 10)
            .bool_var("y")
            .constraint("cap", [("x", 1), ("y", 3)], Operator::Le, 7)
            .maximize([("x", 1)])
            .time_limit(5.0)
            .build()
            .unwrap();

        assert_eq!(request.variables.len(), 2);
        assert_eq!(request.constraints[0].terms[1].coeff, 3);
        assert_eq!(request.objective.unwrap().sense, ObjectiveSense::Maximize);
        assert_eq!(request.options.unwrap().time_limit_seconds, Some(5.0));
    }

    #[test]
    fn test_builder_serializes_wire_format() {
        let request = ProblemBuilder::new()
            .bool_var("x")
            .constraint("on", [("x", 1)], Operator::Ge, 1)
            .build()
            .unwrap();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "variables": [{"name": "x", "type": "bool"}],
                "constraints": [{"name": "on", "terms": [{"var": "x", "coeff": 1}], "op": ">=", "rhs": 1}]
            })
        );
    }

    #[test]
    fn test_builder_duplicate_variable() {
        let result = ProblemBuilder::new().bool_var("x").int_var("x", 0, 1).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_undeclared_reference() {
        let result = ProblemBuilder::new()
            .bool_var("x")
            .minimize([("y", 1)])
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_empty_domain_and_zero_time_limit() {
        assert!(ProblemBuilder::new().int_var("x", 3, 1).build().is_err());
        assert!(ProblemBuilder::new().time_limit(0.0).build().is_err());
        assert!(ProblemBuilder::new().time_limit(f64::NAN).build().is_err());
        assert!(ProblemBuilder::new().time_limit(0.25).build().is_ok());
    }

    #[test]
    fn test_builder_empty_problem_is_allowed() {
        let request = ProblemBuilder::new().build().unwrap();
        assert!(request.variables.is_empty());
        assert!(request.options.is_none());
    }
}
