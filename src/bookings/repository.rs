use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::bookings::error::BookingError;
use crate::bookings::models::{Booking, BookingStatus, NewBooking};

/// Name of the partial unique index guarding the (room_id, booking_date)
/// slot for non-cancelled bookings. Violations of this index are the
/// storage-level signal for a double-booking attempt.
const ACTIVE_SLOT_INDEX: &str = "bookings_active_slot_idx";

const BOOKING_COLUMNS: &str = "id, reference, user_id, user_email, user_name, room_id, \
     room_name, location_name, booking_date, base_price, temperature, deviation, \
     adjusted_price, status, created_at, updated_at";

/// Repository for booking persistence
#[derive(Clone)]
pub struct BookingsRepository {
    pool: PgPool,
}

impl BookingsRepository {
    /// Create a new BookingsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the live (confirmed or completed) booking occupying a slot, if any
    pub async fn find_active_by_room_and_date(
        &self,
        room_id: i32,
        booking_date: NaiveDate,
    ) -> Result<Option<Booking>, BookingError> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings
            WHERE room_id = $1
              AND booking_date = $2
              AND status IN ('confirmed', 'completed')
            LIMIT 1
            "#
        ))
        .bind(room_id)
        .bind(booking_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Insert a finalized booking with status `confirmed`.
    ///
    /// The partial unique index on (room_id, booking_date) is the single
    /// source of truth for slot uniqueness: a violation raised here means
    /// a concurrent writer won the slot, and is surfaced as
    /// `SlotAlreadyBooked` rather than a generic storage error.
    pub async fn insert(&self, new: NewBooking) -> Result<Booking, BookingError> {
        let result = sqlx::query_as::<_, Booking>(&format!(
            r#"
            INSERT INTO bookings (
                id, reference, user_id, user_email, user_name, room_id,
                room_name, location_name, booking_date, base_price,
                temperature, deviation, adjusted_price, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, 'confirmed')
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new.reference)
        .bind(new.user_id)
        .bind(&new.user_email)
        .bind(&new.user_name)
        .bind(new.room_id)
        .bind(&new.room_name)
        .bind(&new.location_name)
        .bind(new.booking_date)
        .bind(new.base_price)
        .bind(new.temperature)
        .bind(new.deviation)
        .bind(new.adjusted_price)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(booking) => Ok(booking),
            Err(e) if is_slot_conflict(&e) => Err(BookingError::SlotAlreadyBooked {
                conflicting_id: None,
                conflicting_status: None,
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Find a booking by ID
    pub async fn find_by_id(&self, booking_id: Uuid) -> Result<Option<Booking>, BookingError> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Find bookings by user ID with optional status filter, most recent
    /// booking date first; ties broken by creation time descending
    pub async fn find_by_user(
        &self,
        user_id: i32,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, BookingError> {
        let bookings = match status {
            Some(status_filter) => {
                sqlx::query_as::<_, Booking>(&format!(
                    r#"
                    SELECT {BOOKING_COLUMNS}
                    FROM bookings
                    WHERE user_id = $1 AND status = $2
                    ORDER BY booking_date DESC, created_at DESC
                    "#
                ))
                .bind(user_id)
                .bind(status_filter)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Booking>(&format!(
                    r#"
                    SELECT {BOOKING_COLUMNS}
                    FROM bookings
                    WHERE user_id = $1
                    ORDER BY booking_date DESC, created_at DESC
                    "#
                ))
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(bookings)
    }

    /// Find active bookings for a room within an inclusive date range
    pub async fn find_by_room_in_range(
        &self,
        room_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Booking>, BookingError> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings
            WHERE room_id = $1
              AND booking_date BETWEEN $2 AND $3
              AND status IN ('confirmed', 'completed')
            ORDER BY booking_date
            "#
        ))
        .bind(room_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Find all bookings with optional status and room filters (admin listing)
    pub async fn find_all(
        &self,
        status: Option<BookingStatus>,
        room_id: Option<i32>,
    ) -> Result<Vec<Booking>, BookingError> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::int4 IS NULL OR room_id = $2)
            ORDER BY booking_date DESC, created_at DESC
            "#
        ))
        .bind(status)
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Update a booking's status
    pub async fn update_status(
        &self,
        booking_id: Uuid,
        new_status: BookingStatus,
    ) -> Result<Booking, BookingError> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            r#"
            UPDATE bookings
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(new_status)
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(BookingError::NotFound)?;

        Ok(booking)
    }
}

/// True when the error is a unique violation on the active-slot index.
/// Other unique violations (e.g. the reference column) stay generic.
fn is_slot_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some(ACTIVE_SLOT_INDEX)
        }
        _ => false,
    }
}
