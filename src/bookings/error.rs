use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::bookings::models::BookingStatus;
use crate::bookings::status_machine::TransitionError;
use crate::catalog::error::CatalogError;

/// Error types for booking operations
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Invalid booking date: {0}")]
    InvalidDate(String),

    #[error("Room {0} not found")]
    RoomNotFound(i32),

    #[error("Room {0} is not active")]
    RoomInactive(i32),

    #[error("Catalog service unavailable: {0}")]
    CatalogUnavailable(String),

    /// The (room, date) slot is held by a live booking. The conflicting
    /// booking's id and status are included when known so the caller can
    /// pick another date.
    #[error("Room is already booked for the requested date")]
    SlotAlreadyBooked {
        conflicting_id: Option<Uuid>,
        conflicting_status: Option<BookingStatus>,
    },

    #[error("Booking not found")]
    NotFound,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Booking is already cancelled")]
    AlreadyCancelled,

    #[error("A completed booking cannot be cancelled")]
    CannotCancelCompleted,

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for BookingError {
    fn from(err: sqlx::Error) -> Self {
        BookingError::DatabaseError(err.to_string())
    }
}

impl From<CatalogError> for BookingError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::RoomNotFound(id) => BookingError::RoomNotFound(id),
            CatalogError::RoomInactive(id) => BookingError::RoomInactive(id),
            CatalogError::Unavailable(detail) => BookingError::CatalogUnavailable(detail),
        }
    }
}

impl From<TransitionError> for BookingError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::AlreadyCancelled => BookingError::AlreadyCancelled,
            TransitionError::CannotCancelCompleted => BookingError::CannotCancelCompleted,
            TransitionError::Invalid { from, to } => {
                BookingError::InvalidTransition(format!("from {} to {}", from, to))
            }
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            BookingError::InvalidDate(msg) => {
                debug!("Invalid booking date: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": format!("Invalid booking date: {}", msg) }),
                )
            }
            BookingError::RoomNotFound(id) => {
                debug!("Room {} not found", id);
                (
                    StatusCode::NOT_FOUND,
                    json!({ "error": format!("Room {} not found", id) }),
                )
            }
            BookingError::RoomInactive(id) => {
                warn!("Attempt to book inactive room {}", id);
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": format!("Room {} is not active", id) }),
                )
            }
            BookingError::CatalogUnavailable(detail) => {
                error!("Catalog service unavailable: {}", detail);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    json!({ "error": "Catalog service unavailable" }),
                )
            }
            BookingError::SlotAlreadyBooked {
                conflicting_id,
                conflicting_status,
            } => {
                warn!(
                    "Slot conflict with booking {:?} (status {:?})",
                    conflicting_id, conflicting_status
                );
                let mut body = json!({
                    "error": "Room is already booked for the requested date",
                });
                if let (Some(id), Some(status)) = (conflicting_id, conflicting_status) {
                    body["conflicting_booking"] = json!({
                        "id": id,
                        "status": status,
                    });
                }
                (StatusCode::CONFLICT, body)
            }
            BookingError::NotFound => {
                debug!("Booking not found");
                (StatusCode::NOT_FOUND, json!({ "error": "Booking not found" }))
            }
            BookingError::Forbidden(msg) => {
                warn!("Forbidden booking access: {}", msg);
                (StatusCode::FORBIDDEN, json!({ "error": msg }))
            }
            BookingError::AlreadyCancelled => {
                debug!("Cancel rejected: booking already cancelled");
                (
                    StatusCode::CONFLICT,
                    json!({ "error": "Booking is already cancelled" }),
                )
            }
            BookingError::CannotCancelCompleted => {
                debug!("Cancel rejected: booking is completed");
                (
                    StatusCode::CONFLICT,
                    json!({ "error": "A completed booking cannot be cancelled" }),
                )
            }
            BookingError::InvalidTransition(msg) => {
                warn!("Invalid status transition: {}", msg);
                (
                    StatusCode::CONFLICT,
                    json!({ "error": format!("Invalid status transition: {}", msg) }),
                )
            }
            BookingError::ValidationError(msg) => {
                debug!("Validation error: {}", msg);
                (StatusCode::BAD_REQUEST, json!({ "error": msg }))
            }
            BookingError::DatabaseError(detail) => {
                // Full detail stays in the logs; clients get a generic message
                error!("Database error: {}", detail);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    json!({ "error": "Booking store unavailable" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl BookingError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BookingError::InvalidDate(_) => StatusCode::BAD_REQUEST,
            BookingError::RoomNotFound(_) => StatusCode::NOT_FOUND,
            BookingError::RoomInactive(_) => StatusCode::BAD_REQUEST,
            BookingError::CatalogUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            BookingError::SlotAlreadyBooked { .. } => StatusCode::CONFLICT,
            BookingError::NotFound => StatusCode::NOT_FOUND,
            BookingError::Forbidden(_) => StatusCode::FORBIDDEN,
            BookingError::AlreadyCancelled => StatusCode::CONFLICT,
            BookingError::CannotCancelCompleted => StatusCode::CONFLICT,
            BookingError::InvalidTransition(_) => StatusCode::CONFLICT,
            BookingError::ValidationError(_) => StatusCode::BAD_REQUEST,
            BookingError::DatabaseError(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}
