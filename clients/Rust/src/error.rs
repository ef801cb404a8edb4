use thiserror::Error;

/// Result type for MILP Solve API client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the MILP Solve API client
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid URL provided
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The server rejected the request body (HTTP 422)
    #[error("Validation error: {0}")]
    Validation(String),

    /// API returned another error response
    #[error("API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid request configuration
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
