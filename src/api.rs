use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;

use crate::config::Config;
use crate::domain::solve::solve_with;
use crate::domain::solver::Solver;
use crate::domain::solver_factory::create_solver;
use crate::domain::validate::validate_solve_request;
use crate::error::ApiError;
use crate::models::SolveRequest;

/// Shared, read-only handler state. Backends are stateless; every request
/// builds its own translation context.
#[derive(Clone)]
pub struct AppState {
    pub solver: Arc<dyn Solver>,
    pub default_time_limit: Option<Duration>,
}

impl AppState {
    pub fn new(solver: Arc<dyn Solver>, default_time_limit: Option<Duration>) -> Self {
        AppState {
            solver,
            default_time_limit,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        AppState::new(
            Arc::from(create_solver(config.solver)),
            Some(config.default_time_limit),
        )
    }
}

/// POST /solve
pub async fn solve(
    state: web::Data<AppState>,
    http: HttpRequest,
    body: web::Json<SolveRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    validate_solve_request(&request).map_err(ApiError::Validation)?;

    let solver = Arc::clone(&state.solver);
    let fallback = state.default_time_limit;

    // CPU-bound; keep it off the async workers.
    let result = web::block(move || solve_with(&request, solver.as_ref(), fallback))
        .await
        .map_err(|err| {
            log::error!("Solve worker failed on {}: {}", http.path(), err);
            ApiError::internal(http.uri().to_string(), err.to_string())
        })?;

    Ok(HttpResponse::Ok().json(result))
}

/// GET /health
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// GET /docs
pub async fn docs() -> impl Responder {
    let docs_html = include_str!("../static/docs.html");
    HttpResponse::Ok()
        .content_type("text/html")
        .body(docs_html)
}

/// GET / - Redirect to docs
pub async fn root_redirect() -> impl Responder {
    HttpResponse::Found()
        .append_header(("Location", "/docs"))
        .finish()
}

/// Body decoding settings shared by the server and tests.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _| ApiError::Payload(err).into())
}

/// Register every route; the caller supplies `AppState` and `JsonConfig`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root_redirect))
        .route("/solve", web::post().to(solve))
        .route("/health", web::get().to(health_check))
        .route("/docs", web::get().to(docs));
}
