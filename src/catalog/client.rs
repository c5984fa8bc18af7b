// HTTP client for the external room/location catalog service

use crate::catalog::error::CatalogError;
use crate::catalog::models::RoomSnapshot;
use reqwest::StatusCode;
use tracing::debug;

/// Client for fetching room details from the catalog service
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new CatalogClient.
    /// The reqwest client is expected to carry a bounded request timeout.
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// Fetch a room by id.
    ///
    /// # Errors
    /// * `RoomNotFound` - the catalog answered 404
    /// * `Unavailable` - network failure, 5xx, or a malformed response
    pub async fn get_room(&self, room_id: i32) -> Result<RoomSnapshot, CatalogError> {
        let endpoint = format!("{}/api/rooms/{}", self.base_url, room_id);

        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                let room = response
                    .json::<RoomSnapshot>()
                    .await
                    .map_err(|e| CatalogError::Unavailable(e.to_string()))?;
                debug!("Fetched room {} ({})", room.id, room.name);
                Ok(room)
            }
            StatusCode::NOT_FOUND => Err(CatalogError::RoomNotFound(room_id)),
            status => Err(CatalogError::Unavailable(format!(
                "catalog service returned {}",
                status
            ))),
        }
    }

    /// Fetch a room and additionally require it to be active.
    /// Distinguishing "not found" from "inactive" lets the orchestrator
    /// answer 404 vs 400 precisely.
    pub async fn validate_room(&self, room_id: i32) -> Result<RoomSnapshot, CatalogError> {
        let room = self.get_room(room_id).await?;

        if !room.is_active {
            return Err(CatalogError::RoomInactive(room_id));
        }

        Ok(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, routing::get, Json, Router};
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::time::Duration;

    fn test_http_client() -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap()
    }

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn unreachable_base_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    fn stub_room(id: i32, is_active: bool) -> serde_json::Value {
        json!({
            "id": id,
            "name": "Boardroom A",
            "location_id": 1,
            "location_name": "Downtown",
            "capacity": 12,
            "base_price": 250.0,
            "is_active": is_active
        })
    }

    #[tokio::test]
    async fn test_get_room_returns_snapshot() {
        let router = Router::new().route(
            "/api/rooms/:id",
            get(|Path(id): Path<i32>| async move { Json(stub_room(id, true)) }),
        );
        let base_url = spawn_stub(router).await;

        let client = CatalogClient::new(test_http_client(), base_url);
        let room = client.get_room(3).await.unwrap();

        assert_eq!(room.id, 3);
        assert_eq!(room.base_price, dec!(250));
        assert_eq!(room.location_id, 1);
    }

    #[tokio::test]
    async fn test_get_room_missing_is_not_found() {
        // No matching route: the stub answers 404 like the real catalog
        let router = Router::new();
        let base_url = spawn_stub(router).await;

        let client = CatalogClient::new(test_http_client(), base_url);
        let result = client.get_room(99).await;

        assert!(matches!(result, Err(CatalogError::RoomNotFound(99))));
    }

    #[tokio::test]
    async fn test_validate_room_rejects_inactive() {
        let router = Router::new().route(
            "/api/rooms/:id",
            get(|Path(id): Path<i32>| async move { Json(stub_room(id, false)) }),
        );
        let base_url = spawn_stub(router).await;

        let client = CatalogClient::new(test_http_client(), base_url);
        let result = client.validate_room(5).await;

        assert!(matches!(result, Err(CatalogError::RoomInactive(5))));
    }

    #[tokio::test]
    async fn test_validate_room_accepts_active() {
        let router = Router::new().route(
            "/api/rooms/:id",
            get(|Path(id): Path<i32>| async move { Json(stub_room(id, true)) }),
        );
        let base_url = spawn_stub(router).await;

        let client = CatalogClient::new(test_http_client(), base_url);
        let room = client.validate_room(5).await.unwrap();

        assert!(room.is_active);
    }

    #[tokio::test]
    async fn test_unreachable_catalog_is_unavailable() {
        let client = CatalogClient::new(test_http_client(), unreachable_base_url());
        let result = client.get_room(1).await;

        assert!(matches!(result, Err(CatalogError::Unavailable(_))));
    }
}
