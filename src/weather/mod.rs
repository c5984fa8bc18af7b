// Weather module
// Cached client for the external weather oracle. Oracle failures are
// absorbed into a neutral fallback forecast so booking creation never
// fails on a missing weather signal.

pub mod client;
pub mod models;

pub use client::WeatherClient;
pub use models::Forecast;
