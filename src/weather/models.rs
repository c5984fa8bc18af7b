// Weather data models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Temperature forecast for a (location, date) pair.
/// `fallback` is true when the oracle could not be reached and the
/// comfortable reference temperature was substituted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Forecast {
    pub temperature: Decimal,
    pub fallback: bool,
}

/// Canonical response shape of the weather oracle
#[derive(Debug, Deserialize)]
pub struct OracleResponse {
    pub temperature: Decimal,
}
