//! # MILP Solve API Client
//!
//! A Rust client SDK for the MILP Solve API, which solves integer linear
//! programs described by variables, linear constraints and an optional objective.
//!
//! ## Example
//!
//! ```no_run
//! use milp_solve_sdk::{Operator, ProblemBuilder, SolveStatus, SolverClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SolverClient::new("http://localhost:9000")?;
//!
//!     let request = ProblemBuilder::new()
//!         .int_var("x", 0, 10)
//!         .int_var("y", 0, 10)
//!         .constraint("cap", [("x", 1), ("y", 1)], Operator::Le, 7)
//!         .maximize([("x", 1), ("y", 1)])
//!         .time_limit(10.0)
//!         .build()?;
//!
//!     let result = client.solve(&request).await?;
//!     if result.status == SolveStatus::Optimal {
//!         println!("Values: {:?}", result.values);
//!     }
//!     Ok(())
//! }
//! ```

pub mod types;
pub mod client;
pub mod builder;
pub mod error;

pub use client::SolverClient;
pub use types::{
    Constraint, Objective, ObjectiveSense, Operator, SolveOptions, SolveRequest, SolveResult,
    SolveStatus, Term, Variable, VariableKind,
};
pub use builder::ProblemBuilder;
pub use error::{ClientError, Result};
