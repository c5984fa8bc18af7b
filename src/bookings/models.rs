use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Booking status enum representing the lifecycle of a booking
///
/// A simple terminal-state machine: `confirmed` can move to `cancelled`
/// (explicit cancel) or `completed` (out-of-scope batch concern); both
/// of those are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Convert status to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    /// Parse status from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }

    /// Statuses that occupy a slot: a cancelled booking frees it
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Confirmed | BookingStatus::Completed)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Domain model representing a booking in the database.
///
/// `user_email`, `user_name`, `room_name` and `location_name` are
/// denormalized display fields captured at creation time so historical
/// bookings remain displayable if the catalog or identity records later
/// change. Pricing fields are immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: Uuid,
    /// Human-readable booking reference, unique, format opaque to callers
    pub reference: String,
    pub user_id: i32,
    pub user_email: String,
    pub user_name: String,
    pub room_id: i32,
    pub room_name: String,
    pub location_name: String,
    pub booking_date: NaiveDate,
    pub base_price: Decimal,
    pub temperature: Decimal,
    pub deviation: Decimal,
    pub adjusted_price: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert parameters for a finalized booking record
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub reference: String,
    pub user_id: i32,
    pub user_email: String,
    pub user_name: String,
    pub room_id: i32,
    pub room_name: String,
    pub location_name: String,
    pub booking_date: NaiveDate,
    pub base_price: Decimal,
    pub temperature: Decimal,
    pub deviation: Decimal,
    pub adjusted_price: Decimal,
}

/// Request DTO for creating a booking
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    #[validate(range(min = 1, message = "room_id must be positive"))]
    pub room_id: i32,
    /// Calendar date in YYYY-MM-DD form; must be strictly in the future
    pub booking_date: String,
}

/// Price breakdown returned alongside a created booking, for transparency
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PriceBreakdown {
    pub base_price: Decimal,
    pub temperature: Decimal,
    pub comfortable_temperature: Decimal,
    pub deviation: Decimal,
    pub adjustment_factor: Decimal,
    pub adjusted_price: Decimal,
    /// True when the weather oracle was unavailable and the neutral
    /// fallback forecast was used
    pub fallback_forecast: bool,
}

/// Response DTO for booking creation
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingCreated {
    pub booking: Booking,
    pub price_breakdown: PriceBreakdown,
}

/// Response DTO for room availability queries
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub room_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Dates in the range occupied by a confirmed or completed booking
    pub booked_dates: Vec<NaiveDate>,
    pub count: usize,
}

/// Alphabet for booking references; skips easily-confused characters
const REFERENCE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";
const REFERENCE_LENGTH: usize = 8;

/// Generate a human-readable booking reference, e.g. "BK-7Q2M9XA4"
pub fn generate_reference() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..REFERENCE_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..REFERENCE_ALPHABET.len());
            REFERENCE_ALPHABET[idx] as char
        })
        .collect();
    format!("BK-{}", suffix)
}
