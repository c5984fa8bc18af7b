// Identity module
// Verifies bearer tokens against the external identity service and exposes
// the authenticated principal to handlers through an axum extractor

pub mod client;
pub mod error;
pub mod middleware;
pub mod models;

pub use client::IdentityClient;
pub use error::IdentityError;
pub use models::{Principal, Role};
