// HTTP handlers for booking endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::bookings::models::{
    AvailabilityResponse, Booking, BookingCreated, BookingStatus, CreateBookingRequest,
};
use crate::bookings::BookingError;
use crate::identity::Principal;

/// Query parameters for a user's booking history
#[derive(Debug, Deserialize)]
pub struct BookingHistoryQuery {
    /// Optional status filter
    pub status: Option<BookingStatus>,
}

/// Query parameters for the admin booking listing
#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    pub status: Option<BookingStatus>,
    pub room_id: Option<i32>,
}

/// Query parameters for room availability
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub start_date: String,
    pub end_date: String,
}

/// Handler for POST /api/bookings
/// Creates a booking for the authenticated principal
#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingCreated),
        (status = 400, description = "Invalid date or inactive room"),
        (status = 404, description = "Room not found"),
        (status = 409, description = "Slot already booked"),
        (status = 503, description = "Upstream service unavailable")
    ),
    tag = "bookings"
)]
pub async fn create_booking_handler(
    State(state): State<crate::AppState>,
    principal: Principal,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingCreated>), BookingError> {
    request
        .validate()
        .map_err(|e| BookingError::ValidationError(e.to_string()))?;

    let created = state.bookings.create_booking(&principal, request).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for GET /api/bookings
/// Lists every booking, admin only
#[utoipa::path(
    get,
    path = "/api/bookings",
    params(
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("room_id" = Option<i32>, Query, description = "Filter by room")
    ),
    responses(
        (status = 200, description = "All bookings", body = Vec<Booking>),
        (status = 403, description = "Caller is not an admin")
    ),
    tag = "bookings"
)]
pub async fn list_all_bookings_handler(
    State(state): State<crate::AppState>,
    principal: Principal,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<Vec<Booking>>, BookingError> {
    let bookings = state
        .bookings
        .list_all_bookings(&principal, query.status, query.room_id)
        .await?;

    Ok(Json(bookings))
}

/// Handler for GET /api/bookings/:booking_id
/// Retrieves a booking, owner or admin only
#[utoipa::path(
    get,
    path = "/api/bookings/{booking_id}",
    params(
        ("booking_id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking found", body = Booking),
        (status = 403, description = "Caller may not access this booking"),
        (status = 404, description = "Booking not found")
    ),
    tag = "bookings"
)]
pub async fn get_booking_handler(
    State(state): State<crate::AppState>,
    principal: Principal,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<Booking>, BookingError> {
    let booking = state.bookings.get_booking(&principal, booking_id).await?;

    Ok(Json(booking))
}

/// Handler for POST /api/bookings/:booking_id/cancel
/// Cancels a confirmed booking, owner or admin only
#[utoipa::path(
    post,
    path = "/api/bookings/{booking_id}/cancel",
    params(
        ("booking_id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking cancelled", body = Booking),
        (status = 403, description = "Caller may not cancel this booking"),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Already cancelled or completed")
    ),
    tag = "bookings"
)]
pub async fn cancel_booking_handler(
    State(state): State<crate::AppState>,
    principal: Principal,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<Booking>, BookingError> {
    let booking = state.bookings.cancel_booking(&principal, booking_id).await?;

    Ok(Json(booking))
}

/// Handler for GET /api/bookings/user/:user_id
/// Retrieves booking history for a user, owner or admin only
#[utoipa::path(
    get,
    path = "/api/bookings/user/{user_id}",
    params(
        ("user_id" = i32, Path, description = "User ID"),
        ("status" = Option<String>, Query, description = "Filter by status")
    ),
    responses(
        (status = 200, description = "User's bookings", body = Vec<Booking>),
        (status = 403, description = "Caller may not list this user's bookings")
    ),
    tag = "bookings"
)]
pub async fn get_user_bookings_handler(
    State(state): State<crate::AppState>,
    principal: Principal,
    Path(user_id): Path<i32>,
    Query(query): Query<BookingHistoryQuery>,
) -> Result<Json<Vec<Booking>>, BookingError> {
    let bookings = state
        .bookings
        .get_user_bookings(&principal, user_id, query.status)
        .await?;

    Ok(Json(bookings))
}

/// Handler for GET /api/rooms/:room_id/availability
/// Reports occupied dates for a room within an inclusive range.
/// Unauthenticated: callers use it to pick a free date.
#[utoipa::path(
    get,
    path = "/api/rooms/{room_id}/availability",
    params(
        ("room_id" = i32, Path, description = "Room ID"),
        ("start_date" = String, Query, description = "Range start (YYYY-MM-DD)"),
        ("end_date" = String, Query, description = "Range end (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Occupied dates in range", body = AvailabilityResponse),
        (status = 400, description = "Malformed or inverted date range")
    ),
    tag = "bookings"
)]
pub async fn check_availability_handler(
    State(state): State<crate::AppState>,
    Path(room_id): Path<i32>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, BookingError> {
    let availability = state
        .bookings
        .check_availability(room_id, &query.start_date, &query.end_date)
        .await?;

    Ok(Json(availability))
}
