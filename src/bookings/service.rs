use chrono::NaiveDate;
use tracing::{debug, info};
use uuid::Uuid;

use crate::bookings::models::{
    generate_reference, AvailabilityResponse, Booking, BookingCreated, BookingStatus,
    CreateBookingRequest, NewBooking, PriceBreakdown,
};
use crate::bookings::{BookingError, BookingsRepository, PriceCalculator, StatusMachine};
use crate::catalog::CatalogClient;
use crate::identity::Principal;
use crate::notifications::{BookingNotice, NotificationDispatcher, NotificationEvent};
use crate::validation::{is_future_date, parse_calendar_date, validate_date_range};
use crate::weather::WeatherClient;

/// Orchestrator for the booking workflow.
///
/// Coordinates the catalog, weather and notification collaborators around
/// the booking store, enforcing the slot-uniqueness and temporal
/// invariants and computing the authoritative price.
#[derive(Clone)]
pub struct BookingService {
    repo: BookingsRepository,
    catalog: CatalogClient,
    weather: WeatherClient,
    pricing: PriceCalculator,
    notifier: NotificationDispatcher,
}

impl BookingService {
    /// Create a new BookingService
    pub fn new(
        repo: BookingsRepository,
        catalog: CatalogClient,
        weather: WeatherClient,
        pricing: PriceCalculator,
        notifier: NotificationDispatcher,
    ) -> Self {
        Self {
            repo,
            catalog,
            weather,
            pricing,
            notifier,
        }
    }

    /// Create a booking for the authenticated principal.
    ///
    /// Steps run in a fixed order chosen to fail fast and to avoid paying
    /// for external calls on requests that will be rejected anyway:
    ///
    /// 1. date validation (local, cheapest)
    /// 2. room validation against the catalog (not-found / inactive /
    ///    unavailable all propagate verbatim)
    /// 3. availability probe - an occupied slot is reported with the
    ///    conflicting booking's id and status, and the weather oracle is
    ///    never consulted
    /// 4. weather forecast (infallible; falls back to the comfortable
    ///    temperature when the oracle is down)
    /// 5. price computation
    /// 6. atomic insert - a unique-index violation here means a concurrent
    ///    writer won the slot between probe and insert, and is surfaced as
    ///    the same slot conflict, never as a storage error
    /// 7. fire-and-forget confirmation notification
    pub async fn create_booking(
        &self,
        principal: &Principal,
        request: CreateBookingRequest,
    ) -> Result<BookingCreated, BookingError> {
        let booking_date = self.parse_future_date(&request.booking_date)?;

        let room = self.catalog.validate_room(request.room_id).await?;

        if let Some(existing) = self
            .repo
            .find_active_by_room_and_date(room.id, booking_date)
            .await?
        {
            return Err(BookingError::SlotAlreadyBooked {
                conflicting_id: Some(existing.id),
                conflicting_status: Some(existing.status),
            });
        }

        let forecast = self.weather.get_forecast(room.location_id, booking_date).await;
        let quote = self.pricing.compute(room.base_price, forecast.temperature);

        let insert_result = self
            .repo
            .insert(NewBooking {
                reference: generate_reference(),
                user_id: principal.id,
                user_email: principal.email.clone(),
                user_name: principal.name.clone(),
                room_id: room.id,
                room_name: room.name.clone(),
                location_name: room.location_name.clone(),
                booking_date,
                base_price: room.base_price,
                temperature: forecast.temperature,
                deviation: quote.deviation,
                adjusted_price: quote.adjusted_price,
            })
            .await;

        let booking = match insert_result {
            Ok(booking) => booking,
            // Lost the race between probe and insert: report the winner
            Err(BookingError::SlotAlreadyBooked { .. }) => {
                let winner = self
                    .repo
                    .find_active_by_room_and_date(room.id, booking_date)
                    .await?;
                return Err(BookingError::SlotAlreadyBooked {
                    conflicting_id: winner.as_ref().map(|b| b.id),
                    conflicting_status: winner.as_ref().map(|b| b.status),
                });
            }
            Err(e) => return Err(e),
        };

        info!(
            "Created booking {} for user {} (room {} on {}, adjusted price {})",
            booking.reference, principal.id, room.id, booking_date, quote.adjusted_price
        );

        self.notifier
            .dispatch(NotificationEvent::BookingConfirmation(BookingNotice::from(
                &booking,
            )));

        let price_breakdown = PriceBreakdown {
            base_price: room.base_price,
            temperature: forecast.temperature,
            comfortable_temperature: self.pricing.comfortable_temperature(),
            deviation: quote.deviation,
            adjustment_factor: self.pricing.adjustment_factor(),
            adjusted_price: quote.adjusted_price,
            fallback_forecast: forecast.fallback,
        };

        Ok(BookingCreated {
            booking,
            price_breakdown,
        })
    }

    /// Get bookings for a user with optional status filter.
    /// Only the owner or an admin may list a user's bookings.
    pub async fn get_user_bookings(
        &self,
        principal: &Principal,
        user_id: i32,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, BookingError> {
        Self::ensure_owner_or_admin(principal, user_id)?;
        self.repo.find_by_user(user_id, status).await
    }

    /// Get a specific booking by ID, owner or admin only
    pub async fn get_booking(
        &self,
        principal: &Principal,
        booking_id: Uuid,
    ) -> Result<Booking, BookingError> {
        let booking = self
            .repo
            .find_by_id(booking_id)
            .await?
            .ok_or(BookingError::NotFound)?;

        Self::ensure_owner_or_admin(principal, booking.user_id)?;

        Ok(booking)
    }

    /// Cancel a booking.
    ///
    /// The status machine guards the transition: already-cancelled and
    /// completed bookings are rejected with precise errors. A successful
    /// cancellation frees the slot for new bookings and dispatches a
    /// fire-and-forget cancellation notification.
    pub async fn cancel_booking(
        &self,
        principal: &Principal,
        booking_id: Uuid,
    ) -> Result<Booking, BookingError> {
        let booking = self
            .repo
            .find_by_id(booking_id)
            .await?
            .ok_or(BookingError::NotFound)?;

        Self::ensure_owner_or_admin(principal, booking.user_id)?;

        StatusMachine::transition(booking.status, BookingStatus::Cancelled)?;

        let cancelled = self
            .repo
            .update_status(booking_id, BookingStatus::Cancelled)
            .await?;

        info!(
            "Cancelled booking {} (room {} on {})",
            cancelled.reference, cancelled.room_id, cancelled.booking_date
        );

        self.notifier
            .dispatch(NotificationEvent::BookingCancellation(BookingNotice::from(
                &cancelled,
            )));

        Ok(cancelled)
    }

    /// Report the occupied dates for a room within an inclusive range.
    /// Read-only and unauthenticated; used by callers to pick a free date
    /// without guessing.
    pub async fn check_availability(
        &self,
        room_id: i32,
        start_date: &str,
        end_date: &str,
    ) -> Result<AvailabilityResponse, BookingError> {
        let start = parse_calendar_date(start_date).map_err(|_| {
            BookingError::InvalidDate(format!("'{}' is not a valid calendar date", start_date))
        })?;
        let end = parse_calendar_date(end_date).map_err(|_| {
            BookingError::InvalidDate(format!("'{}' is not a valid calendar date", end_date))
        })?;
        validate_date_range(start, end).map_err(|_| {
            BookingError::InvalidDate("start_date must not be after end_date".to_string())
        })?;

        let bookings = self.repo.find_by_room_in_range(room_id, start, end).await?;
        let booked_dates: Vec<NaiveDate> = bookings.iter().map(|b| b.booking_date).collect();

        debug!(
            "Room {} has {} occupied dates between {} and {}",
            room_id,
            booked_dates.len(),
            start,
            end
        );

        Ok(AvailabilityResponse {
            room_id,
            start_date: start,
            end_date: end,
            count: booked_dates.len(),
            booked_dates,
        })
    }

    /// List every booking, admin only, with optional status/room filters
    pub async fn list_all_bookings(
        &self,
        principal: &Principal,
        status: Option<BookingStatus>,
        room_id: Option<i32>,
    ) -> Result<Vec<Booking>, BookingError> {
        if !principal.is_admin() {
            return Err(BookingError::Forbidden(
                "Only admins may list all bookings".to_string(),
            ));
        }

        self.repo.find_all(status, room_id).await
    }

    /// Parse and validate a booking date: well-formed and strictly later
    /// than today in UTC (same-day bookings are rejected)
    fn parse_future_date(&self, raw: &str) -> Result<NaiveDate, BookingError> {
        let date = parse_calendar_date(raw).map_err(|_| {
            BookingError::InvalidDate(format!(
                "'{}' is not a valid calendar date (expected YYYY-MM-DD)",
                raw
            ))
        })?;

        if !is_future_date(date) {
            return Err(BookingError::InvalidDate(
                "booking date must be strictly in the future".to_string(),
            ));
        }

        Ok(date)
    }

    /// Authorization rule shared by the read and cancel operations:
    /// the owning principal or any admin
    fn ensure_owner_or_admin(principal: &Principal, owner_id: i32) -> Result<(), BookingError> {
        if principal.id == owner_id || principal.is_admin() {
            Ok(())
        } else {
            Err(BookingError::Forbidden(
                "You do not have permission to access this booking".to_string(),
            ))
        }
    }
}
