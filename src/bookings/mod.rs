// Bookings module
// The booking orchestrator and its supporting pieces: pure price
// calculator, status machine, persistence layer and HTTP surface

pub mod error;
pub mod handlers;
pub mod models;
pub mod price_calculator;
pub mod repository;
pub mod service;
pub mod status_machine;

pub use error::BookingError;
pub use handlers::*;
pub use models::*;
pub use price_calculator::{PriceCalculator, PriceQuote};
pub use repository::BookingsRepository;
pub use service::BookingService;
pub use status_machine::{StatusMachine, TransitionError};
