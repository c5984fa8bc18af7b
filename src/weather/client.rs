// Cached HTTP client for the external weather oracle
//
// Implements the degraded-mode policy for weather: any oracle failure
// (timeout, connection error, rate limit, 5xx, malformed body) yields a
// fallback forecast at the comfortable reference temperature instead of
// an error. The booking is the valuable transaction; the weather signal
// is only a pricing modifier.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::weather::models::{Forecast, OracleResponse};

/// Cached forecast entry
struct CacheEntry {
    temperature: Decimal,
    inserted_at: Instant,
}

impl CacheEntry {
    fn is_stale(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() > ttl
    }
}

/// Client for the weather oracle with an in-process forecast cache.
/// The cache is a performance optimization only; eviction or loss never
/// changes correctness, it just costs a redundant oracle call.
#[derive(Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    comfortable_temperature: Decimal,
    cache_ttl: Duration,
    cache: Arc<RwLock<HashMap<(i32, NaiveDate), CacheEntry>>>,
}

impl WeatherClient {
    /// Create a new WeatherClient.
    ///
    /// # Arguments
    /// * `http` - shared reqwest client carrying the bounded upstream timeout
    /// * `base_url` - weather oracle base URL
    /// * `comfortable_temperature` - neutral temperature substituted on fallback
    /// * `cache_ttl` - retention window for cached forecasts
    pub fn new(
        http: reqwest::Client,
        base_url: String,
        comfortable_temperature: Decimal,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            http,
            base_url,
            comfortable_temperature,
            cache_ttl,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Fetch the forecast for a (location, date) pair.
    ///
    /// Cache hits are served directly. On a miss the oracle is called with
    /// a bounded timeout; any failure whatsoever is converted into a
    /// fallback forecast. This method never returns an error.
    pub async fn get_forecast(&self, location_id: i32, date: NaiveDate) -> Forecast {
        if let Some(temperature) = self.cached(location_id, date).await {
            debug!(
                "Forecast cache hit for location {} on {}: {}",
                location_id, date, temperature
            );
            return Forecast {
                temperature,
                fallback: false,
            };
        }

        match self.fetch_remote(location_id, date).await {
            Ok(temperature) => {
                self.store(location_id, date, temperature).await;
                Forecast {
                    temperature,
                    fallback: false,
                }
            }
            Err(reason) => {
                warn!(
                    "Weather oracle failed for location {} on {}: {}; using fallback forecast",
                    location_id, date, reason
                );
                Forecast {
                    temperature: self.comfortable_temperature,
                    fallback: true,
                }
            }
        }
    }

    async fn cached(&self, location_id: i32, date: NaiveDate) -> Option<Decimal> {
        let cache = self.cache.read().await;
        cache
            .get(&(location_id, date))
            .filter(|entry| !entry.is_stale(self.cache_ttl))
            .map(|entry| entry.temperature)
    }

    async fn store(&self, location_id: i32, date: NaiveDate, temperature: Decimal) {
        let mut cache = self.cache.write().await;
        cache.insert(
            (location_id, date),
            CacheEntry {
                temperature,
                inserted_at: Instant::now(),
            },
        );
    }

    async fn fetch_remote(&self, location_id: i32, date: NaiveDate) -> Result<Decimal, String> {
        let endpoint = format!(
            "{}/api/weather/forecast?location_id={}&date={}",
            self.base_url, location_id, date
        );

        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("weather oracle returned {}", response.status()));
        }

        let body = response
            .json::<OracleResponse>()
            .await
            .map_err(|e| e.to_string())?;

        Ok(body.temperature)
    }
}
