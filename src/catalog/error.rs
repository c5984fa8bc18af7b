// Catalog error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{debug, error, warn};

/// Errors produced while consulting the room catalog.
/// A booking cannot be validated or priced without the room, so all of
/// these propagate to the caller. The three variants are kept distinct so
/// the orchestrator can surface precise user-facing errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Room {0} not found")]
    RoomNotFound(i32),

    #[error("Room {0} is not active")]
    RoomInactive(i32),

    #[error("Catalog service unavailable: {0}")]
    Unavailable(String),
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CatalogError::RoomNotFound(id) => {
                debug!("Room {} not found in catalog", id);
                (StatusCode::NOT_FOUND, format!("Room {} not found", id))
            }
            CatalogError::RoomInactive(id) => {
                warn!("Attempt to book inactive room {}", id);
                (StatusCode::BAD_REQUEST, format!("Room {} is not active", id))
            }
            CatalogError::Unavailable(detail) => {
                error!("Catalog service unavailable: {}", detail);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Catalog service unavailable".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
