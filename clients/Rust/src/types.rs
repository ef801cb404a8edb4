use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Domain of a decision variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableKind {
    /// 0 or 1
    #[serde(rename = "bool")]
    Boolean,
    /// Bounded integer
    #[serde(rename = "int")]
    Integer,
}

/// A decision variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Unique variable name
    pub name: String,
    /// Variable domain
    #[serde(rename = "type")]
    pub kind: VariableKind,
    /// Inclusive lower bound (integers only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    /// Inclusive upper bound (integers only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

/// A variable reference with its coefficient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Name of a declared variable
    pub var: String,
    /// Integer coefficient
    pub coeff: i64,
}

/// Relational operator of a constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// Less than or equal
    #[serde(rename = "<=")]
    Le,
    /// Greater than or equal
    #[serde(rename = ">=")]
    Ge,
    /// Equal
    #[serde(rename = "==")]
    Eq,
}

/// A named linear constraint: sum(coeff * var) op rhs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    /// Name echoed back in `added_constraints`
    pub name: String,
    /// Left-hand side terms
    pub terms: Vec<Term>,
    /// Relational operator
    pub op: Operator,
    /// Right-hand side
    pub rhs: i64,
}

/// Direction for optimization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveSense {
    /// Minimize the objective function
    Minimize,
    /// Maximize the objective function
    Maximize,
}

/// Linear objective
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    /// Optimization direction
    pub sense: ObjectiveSense,
    /// Objective terms
    pub terms: Vec<Term>,
}

/// Solve options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolveOptions {
    /// Wall-clock budget in seconds, fractions allowed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit_seconds: Option<f64>,
}

/// Request body for `POST /solve`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    /// Decision variables
    pub variables: Vec<Variable>,
    /// Linear constraints
    pub constraints: Vec<Constraint>,
    /// Optional objective; without it any feasible solution is returned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<Objective>,
    /// Optional solve options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<SolveOptions>,
}

/// Solution status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolveStatus {
    /// Optimality proven
    Optimal,
    /// Solution found, optimality not proven
    Feasible,
    /// No assignment satisfies the constraints
    Infeasible,
    /// The model could not be built
    ModelInvalid,
    /// The solver stopped without a verdict
    Unknown,
}

/// Response from the solve endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResult {
    /// Outcome
    pub status: SolveStatus,
    /// One value per declared variable, when a solution was found
    #[serde(default)]
    pub values: Option<BTreeMap<String, i64>>,
    /// Achieved objective, when an objective was given and a solution found
    #[serde(default)]
    pub objective_value: Option<i64>,
    /// Engine diagnostics
    #[serde(default)]
    pub solution_info: Option<String>,
    /// Constraints incorporated into the model, in request order
    #[serde(default)]
    pub added_constraints: Vec<String>,
    /// Why the model was invalid
    #[serde(default)]
    pub error: Option<String>,
}
