use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

use crate::domain::validate::FieldError;

/// Errors surfaced by the HTTP layer. Solver outcomes, including
/// `MODEL_INVALID`, are ordinary 200 responses and never show up here.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The body parsed but failed structural checks.
    #[error("Validation Error")]
    Validation(Vec<FieldError>),

    /// The body could not be decoded.
    #[error("Validation Error")]
    Payload(#[from] JsonPayloadError),

    /// Last-resort safety net, e.g. a panic on the solve worker.
    #[error("Internal Server Error")]
    Internal { path: String, detail: String },
}

impl ApiError {
    pub fn internal(path: impl Into<String>, detail: impl Into<String>) -> Self {
        ApiError::Internal {
            path: path.into(),
            detail: detail.into(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Payload(err) => match err {
                JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
                    StatusCode::PAYLOAD_TOO_LARGE
                }
                JsonPayloadError::ContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                JsonPayloadError::Deserialize(_) => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::BAD_REQUEST,
            },
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation(errors) => json!({
                "error": self.to_string(),
                "detail": errors,
            }),
            ApiError::Payload(err) => json!({
                "error": self.to_string(),
                "detail": [{"loc": ["body"], "msg": err.to_string()}],
            }),
            ApiError::Internal { path, detail } => json!({
                "error": self.to_string(),
                "detail": detail,
                "path": path,
            }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
