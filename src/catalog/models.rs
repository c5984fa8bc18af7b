// Catalog data models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Read-only view of a room as served by the catalog.
/// Display fields are copied onto bookings at creation time so historical
/// records survive later catalog changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub id: i32,
    pub name: String,
    pub location_id: i32,
    pub location_name: String,
    pub capacity: i32,
    pub base_price: Decimal,
    pub is_active: bool,
}
