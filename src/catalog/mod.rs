// Catalog module
// Read-only client for the external room/location catalog service

pub mod client;
pub mod error;
pub mod models;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use models::RoomSnapshot;
