// Notifications module
// Fire-and-forget delivery of booking events to the notification sink.
// Dispatch never blocks the response path and failures are logged, never
// propagated.

pub mod dispatcher;
pub mod models;

pub use dispatcher::NotificationDispatcher;
pub use models::{BookingNotice, NotificationEvent};
