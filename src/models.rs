use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

// ---------- Problem IR (wire types) ----------
//
// Every number in the model is an integer. Booleans are integers bounded to
// [0, 1]; anything continuous has to be scaled by the caller.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableKind {
    #[serde(rename = "bool", alias = "boolean")]
    Boolean,
    #[serde(rename = "int", alias = "integer")]
    Integer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: VariableKind,
    /// Inclusive lower bound. Ignored for booleans.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    /// Inclusive upper bound. Ignored for booleans.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

impl Variable {
    pub fn boolean(name: impl Into<String>) -> Self {
        Variable {
            name: name.into(),
            kind: VariableKind::Boolean,
            min: None,
            max: None,
        }
    }

    pub fn integer(name: impl Into<String>, min: Option<i64>, max: Option<i64>) -> Self {
        Variable {
            name: name.into(),
            kind: VariableKind::Integer,
            min,
            max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub var: String,
    pub coeff: i64,
}

impl Term {
    pub fn new(var: impl Into<String>, coeff: i64) -> Self {
        Term {
            var: var.into(),
            coeff,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "==", alias = "=")]
    Eq,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Le => "<=",
            Operator::Ge => ">=",
            Operator::Eq => "==",
        }
    }

    /// Whether `lhs <op> rhs` holds.
    pub fn holds<T: PartialOrd>(self, lhs: T, rhs: T) -> bool {
        match self {
            Operator::Le => lhs <= rhs,
            Operator::Ge => lhs >= rhs,
            Operator::Eq => lhs == rhs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    pub name: String,
    pub terms: Vec<Term>,
    pub op: Operator,
    pub rhs: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveSense {
    Minimize,
    Maximize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub sense: ObjectiveSense,
    pub terms: Vec<Term>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolveOptions {
    /// Wall-clock budget; fractional seconds are allowed.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "positive_seconds"
    )]
    pub time_limit_seconds: Option<f64>,
}

fn positive_seconds<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        Some(secs) if Duration::try_from_secs_f64(secs).map_or(true, |d| d.is_zero()) => Err(
            serde::de::Error::custom(format!("time_limit_seconds must be positive, got {}", secs)),
        ),
        other => Ok(other),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    pub variables: Vec<Variable>,
    pub constraints: Vec<Constraint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<Objective>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<SolveOptions>,
}

impl SolveRequest {
    /// The requested time budget. Values that are not a positive, finite
    /// number of seconds count as absent.
    pub fn time_limit(&self) -> Option<Duration> {
        self.options
            .as_ref()
            .and_then(|o| o.time_limit_seconds)
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
            .filter(|limit| !limit.is_zero())
    }
}

// ---------- API response types ----------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolveStatus {
    Optimal,
    Feasible,
    Infeasible,
    ModelInvalid,
    Unknown,
}

impl SolveStatus {
    pub fn has_solution(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    pub status: SolveStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<BTreeMap<String, i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution_info: Option<String>,
    #[serde(default)]
    pub added_constraints: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SolveResult {
    pub fn model_invalid(error: impl Into<String>, added_constraints: Vec<String>) -> Self {
        SolveResult {
            status: SolveStatus::ModelInvalid,
            values: None,
            objective_value: None,
            solution_info: None,
            added_constraints,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_deserializes_wire_names() {
        let request: SolveRequest = serde_json::from_value(json!({
            "variables": [
                {"name": "x", "type": "bool"},
                {"name": "y", "type": "int", "min": 0, "max": 10}
            ],
            "constraints": [
                {"name": "c1", "terms": [{"var": "x", "coeff": 1}, {"var": "y", "coeff": 2}], "op": "<=", "rhs": 7}
            ],
            "objective": {"sense": "maximize", "terms": [{"var": "y", "coeff": 1}]},
            "options": {"time_limit_seconds": 5}
        }))
        .unwrap();

        assert_eq!(request.variables[0], Variable::boolean("x"));
        assert_eq!(request.variables[1], Variable::integer("y", Some(0), Some(10)));
        assert_eq!(request.constraints[0].op, Operator::Le);
        assert_eq!(request.time_limit(), Some(Duration::from_secs(5)));
        assert_eq!(request.objective.unwrap().sense, ObjectiveSense::Maximize);
    }

    #[test]
    fn test_kind_and_operator_aliases() {
        let v: Variable = serde_json::from_value(json!({"name": "b", "type": "boolean"})).unwrap();
        assert_eq!(v.kind, VariableKind::Boolean);
        let c: Constraint =
            serde_json::from_value(json!({"name": "c", "terms": [], "op": "=", "rhs": 0})).unwrap();
        assert_eq!(c.op, Operator::Eq);
    }

    #[test]
    fn test_unknown_enum_values_are_rejected() {
        let op = serde_json::from_value::<Constraint>(
            json!({"name": "c", "terms": [], "op": "<", "rhs": 0}),
        );
        assert!(op.is_err());

        let kind = serde_json::from_value::<Variable>(json!({"name": "x", "type": "float"}));
        assert!(kind.is_err());

        let sense = serde_json::from_value::<Objective>(json!({"sense": "maximise", "terms": []}));
        assert!(sense.is_err());
    }

    #[test]
    fn test_non_positive_time_limits_are_rejected() {
        for secs in [json!(0), json!(0.0), json!(-1.5), json!(1e300)] {
            let options = serde_json::from_value::<SolveOptions>(json!({"time_limit_seconds": secs}));
            assert!(options.is_err(), "accepted {}", secs);
        }
    }

    #[test]
    fn test_fractional_time_limit_is_accepted() {
        let request: SolveRequest = serde_json::from_value(json!({
            "variables": [],
            "constraints": [],
            "options": {"time_limit_seconds": 0.5}
        }))
        .unwrap();
        assert_eq!(request.time_limit(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_result_omits_unset_fields() {
        let result = SolveResult::model_invalid("boom", vec![]);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({"status": "MODEL_INVALID", "added_constraints": [], "error": "boom"})
        );
    }

    #[test]
    fn test_operator_holds() {
        assert!(Operator::Le.holds(3, 3));
        assert!(!Operator::Ge.holds(2, 3));
        assert!(Operator::Eq.holds(-1, -1));
    }
}
