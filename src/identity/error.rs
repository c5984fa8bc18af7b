// Identity error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

/// Errors produced while authenticating a request.
/// A booking operation cannot proceed without a known principal, so both
/// variants propagate to the caller (unlike weather failures).
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Missing authentication token")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Identity service unavailable: {0}")]
    Unavailable(String),
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            IdentityError::MissingToken => {
                warn!("Missing token in request");
                (
                    StatusCode::UNAUTHORIZED,
                    "Missing authentication token".to_string(),
                )
            }
            IdentityError::InvalidToken => {
                warn!("Invalid token attempt");
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
            IdentityError::Unavailable(detail) => {
                error!("Identity service unavailable: {}", detail);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Identity service unavailable".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

impl IdentityError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            IdentityError::MissingToken => StatusCode::UNAUTHORIZED,
            IdentityError::InvalidToken => StatusCode::UNAUTHORIZED,
            IdentityError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}
