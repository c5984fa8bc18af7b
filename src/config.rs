// Application configuration
// All tunables are read from the environment once at startup and carried
// as an explicit struct; pricing and weather settings are injected into
// the components that need them rather than read ambiently.

use rust_decimal::Decimal;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use tracing::info;

/// Configuration for the booking service, loaded from the process environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Base URL of the room/location catalog service
    pub catalog_base_url: String,
    /// Base URL of the identity (auth) service
    pub identity_base_url: String,
    /// Base URL of the weather oracle
    pub weather_base_url: String,
    /// Base URL of the notification sink
    pub notification_base_url: String,
    /// Reference temperature at which no price adjustment applies (°C)
    pub comfortable_temperature: Decimal,
    /// Price adjustment per degree of deviation from the comfortable temperature
    pub adjustment_factor: Decimal,
    /// Timeout applied to every outbound HTTP call, in seconds
    pub upstream_timeout_secs: u64,
    /// Retention window for cached forecasts, in seconds
    pub forecast_cache_ttl_secs: u64,
    /// Capacity of the notification dispatch queue
    pub notification_queue_capacity: usize,
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to
    /// documented defaults for everything except DATABASE_URL.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_or("PORT", "8080"),
            database_url: env::var("DATABASE_URL")
                .expect("DATABASE_URL must be set in environment"),
            catalog_base_url: env_or("CATALOG_SERVICE_URL", "http://localhost:3002"),
            identity_base_url: env_or("IDENTITY_SERVICE_URL", "http://localhost:3001"),
            weather_base_url: env_or("WEATHER_SERVICE_URL", "http://localhost:3004"),
            notification_base_url: env_or("NOTIFICATION_SERVICE_URL", "http://localhost:3005"),
            comfortable_temperature: env_or("COMFORTABLE_TEMPERATURE", "21"),
            adjustment_factor: env_or("WEATHER_ADJUSTMENT_FACTOR", "0.05"),
            upstream_timeout_secs: env_or("UPSTREAM_TIMEOUT_SECS", "30"),
            forecast_cache_ttl_secs: env_or("FORECAST_CACHE_TTL_SECS", "86400"),
            notification_queue_capacity: env_or("NOTIFICATION_QUEUE_CAPACITY", "256"),
        }
    }
}

/// Read an environment variable, parsing it into the target type and
/// falling back to the given default when unset.
fn env_or<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{} not set, using default: {}", key, default);
        default.to_string()
    });

    raw.parse()
        .unwrap_or_else(|e| panic!("Invalid value for {}: {}", key, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_env_or_returns_default_when_unset() {
        std::env::remove_var("BOOKING_TEST_MISSING_KEY");
        let port: u16 = env_or("BOOKING_TEST_MISSING_KEY", "8080");
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_env_or_parses_set_value() {
        std::env::set_var("BOOKING_TEST_PORT_KEY", "9999");
        let port: u16 = env_or("BOOKING_TEST_PORT_KEY", "8080");
        assert_eq!(port, 9999);
        std::env::remove_var("BOOKING_TEST_PORT_KEY");
    }

    #[test]
    fn test_env_or_parses_decimal_defaults() {
        std::env::remove_var("BOOKING_TEST_FACTOR_KEY");
        let factor: Decimal = env_or("BOOKING_TEST_FACTOR_KEY", "0.05");
        assert_eq!(factor, dec!(0.05));
    }
}
