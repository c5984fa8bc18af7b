// Notification event payloads

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::bookings::models::{Booking, BookingStatus};

/// Denormalized booking fields carried in a notification.
/// The sink has no access to the booking store, so the event is
/// self-contained.
#[derive(Debug, Clone, Serialize)]
pub struct BookingNotice {
    pub reference: String,
    pub user_email: String,
    pub user_name: String,
    pub room_name: String,
    pub location_name: String,
    pub booking_date: NaiveDate,
    pub adjusted_price: Decimal,
    pub status: BookingStatus,
}

impl From<&Booking> for BookingNotice {
    fn from(booking: &Booking) -> Self {
        Self {
            reference: booking.reference.clone(),
            user_email: booking.user_email.clone(),
            user_name: booking.user_name.clone(),
            room_name: booking.room_name.clone(),
            location_name: booking.location_name.clone(),
            booking_date: booking.booking_date,
            adjusted_price: booking.adjusted_price,
            status: booking.status,
        }
    }
}

/// Event dispatched to the notification sink
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "booking", rename_all = "snake_case")]
pub enum NotificationEvent {
    BookingConfirmation(BookingNotice),
    BookingCancellation(BookingNotice),
}
