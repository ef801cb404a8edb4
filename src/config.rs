use std::env;
use std::time::Duration;

use crate::domain::solver_factory::SolverType;

const DEFAULT_PORT: u16 = 9000;
const DEFAULT_JSON_LIMIT: usize = 2 * 1024 * 1024; // 2 MB
/// Upper bound for requests that carry no `time_limit_seconds`.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(100);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown SOLVER {0:?}")]
    UnknownSolver(String),
}

/// Server settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub json_limit: usize,
    pub solver: SolverType,
    /// Applied to requests that do not set `time_limit_seconds`.
    pub default_time_limit: Duration,
    pub sentry_dsn: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            json_limit: DEFAULT_JSON_LIMIT,
            solver: SolverType::default(),
            default_time_limit: DEFAULT_TIME_LIMIT,
            sentry_dsn: None,
        }
    }
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring invalid {}={:?}", key, raw);
            None
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let solver = match env::var("SOLVER") {
            Ok(name) => SolverType::from_str(&name).ok_or(ConfigError::UnknownSolver(name))?,
            Err(_) => defaults.solver,
        };

        let default_time_limit = parsed::<f64>("DEFAULT_TIME_LIMIT_SECONDS")
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
            .filter(|limit| !limit.is_zero())
            .unwrap_or(defaults.default_time_limit);

        Ok(Config {
            port: parsed("PORT").unwrap_or(defaults.port),
            json_limit: parsed("JSON_PAYLOAD_LIMIT").unwrap_or(defaults.json_limit),
            solver,
            default_time_limit,
            sentry_dsn: env::var("SENTRY_DSN").ok().filter(|dsn| !dsn.is_empty()),
        })
    }
}
