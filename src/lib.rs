//! HTTP service that solves integer linear programs described in a small,
//! solver-agnostic JSON model (variables, linear constraints, an optional
//! linear objective) and reports a normalized result.
//!
//! The core lives in [`domain`]: requests are translated into a
//! [`domain::model::LinearModel`] through a per-call
//! [`domain::translate::TranslationContext`], solved by a
//! [`domain::solver::Solver`] backend and normalized by
//! [`domain::solve::solve`], which never fails.

pub mod api;
pub mod config;
pub mod convert;
pub mod domain;
pub mod error;
pub mod models;

pub use api::{configure, json_config, AppState};
pub use config::Config;
pub use domain::solve::{solve, solve_with};
pub use models::{SolveRequest, SolveResult, SolveStatus};
