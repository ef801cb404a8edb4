use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::models::SolveRequest;

/// One structural problem in a request, located by its path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
}

impl FieldError {
    fn new(loc: &[&str], msg: impl Into<String>) -> Self {
        FieldError {
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.loc.join("."), self.msg)
    }
}

/// Shape checks serde cannot express. Term references, the empty name
/// included, are resolved during translation.
pub fn validate_solve_request(request: &SolveRequest) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::with_capacity(request.variables.len());

    for (i, variable) in request.variables.iter().enumerate() {
        let index = i.to_string();
        if variable.name.is_empty() {
            errors.push(FieldError::new(
                &["body", "variables", &index, "name"],
                "variable name must not be empty",
            ));
        } else if !seen.insert(variable.name.as_str()) {
            errors.push(FieldError::new(
                &["body", "variables", &index, "name"],
                format!("duplicate variable name {}", variable.name),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Constraint, Objective, ObjectiveSense, Operator, Term, Variable};

    fn request(variables: Vec<Variable>, terms: Vec<Term>) -> SolveRequest {
        SolveRequest {
            variables,
            constraints: vec![Constraint {
                name: "c".to_string(),
                terms,
                op: Operator::Le,
                rhs: 1,
            }],
            objective: None,
            options: None,
        }
    }

    #[test]
    fn test_validate_given_valid_request_should_return_ok() {
        let req = request(
            vec![Variable::boolean("x"), Variable::integer("y", Some(0), Some(3))],
            vec![Term::new("x", 1), Term::new("y", 2)],
        );
        assert!(validate_solve_request(&req).is_ok());
    }

    #[test]
    fn test_validate_leaves_undefined_references_to_translation() {
        let req = request(vec![Variable::boolean("x")], vec![Term::new("missing", 1)]);
        assert!(validate_solve_request(&req).is_ok());
    }

    #[test]
    fn test_validate_given_duplicate_names_should_return_error() {
        let req = request(
            vec![Variable::boolean("x"), Variable::boolean("y"), Variable::boolean("x")],
            vec![],
        );
        let errors = validate_solve_request(&req).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].loc, vec!["body", "variables", "2", "name"]);
        assert!(errors[0].msg.contains("duplicate"));
    }

    #[test]
    fn test_validate_collects_every_error() {
        let req = request(
            vec![Variable::boolean(""), Variable::boolean("x"), Variable::boolean("x")],
            vec![],
        );
        let errors = validate_solve_request(&req).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].to_string(), "body.variables.0.name: variable name must not be empty");
    }

    #[test]
    fn test_validate_leaves_empty_term_names_to_translation() {
        let mut req = request(vec![Variable::boolean("x")], vec![Term::new("", 1)]);
        req.objective = Some(Objective {
            sense: ObjectiveSense::Maximize,
            terms: vec![Term::new("", 1)],
        });
        assert!(validate_solve_request(&req).is_ok());
    }
}
