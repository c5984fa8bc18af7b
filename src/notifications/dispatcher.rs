// Background notification dispatcher
//
// Events are enqueued onto a bounded channel and delivered by a detached
// worker task, so the caller-visible latency of booking operations never
// includes notification I/O. Every failure mode (sink down, non-2xx,
// full queue) is logged and discarded.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::notifications::models::NotificationEvent;

/// Handle for enqueueing notification events
#[derive(Clone)]
pub struct NotificationDispatcher {
    tx: mpsc::Sender<NotificationEvent>,
}

impl NotificationDispatcher {
    /// Spawn the delivery worker and return the dispatch handle.
    ///
    /// # Arguments
    /// * `http` - shared reqwest client carrying the bounded upstream timeout
    /// * `base_url` - notification sink base URL
    /// * `capacity` - queue capacity; events beyond it are dropped with a warning
    pub fn start(http: reqwest::Client, base_url: String, capacity: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<NotificationEvent>(capacity);

        tokio::spawn(async move {
            let endpoint = format!("{}/api/notifications", base_url);
            while let Some(event) = rx.recv().await {
                match http.post(&endpoint).json(&event).send().await {
                    Ok(response) if response.status().is_success() => {
                        debug!("Delivered notification event");
                    }
                    Ok(response) => {
                        warn!(
                            "Notification sink rejected event with status {}",
                            response.status()
                        );
                    }
                    Err(e) => {
                        warn!("Failed to deliver notification event: {}", e);
                    }
                }
            }
        });

        Self { tx }
    }

    /// Enqueue an event without blocking. A full queue drops the event,
    /// which is acceptable under fire-and-forget semantics.
    pub fn dispatch(&self, event: NotificationEvent) {
        if self.tx.try_send(event).is_err() {
            warn!("Notification queue full, dropping event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookings::models::BookingStatus;
    use crate::notifications::models::BookingNotice;
    use axum::{extract::State, routing::post, Json, Router};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn test_http_client() -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap()
    }

    fn unreachable_base_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    fn sample_event() -> NotificationEvent {
        NotificationEvent::BookingConfirmation(BookingNotice {
            reference: "BK-7Q2M9XA4".to_string(),
            user_email: "alice@example.com".to_string(),
            user_name: "Alice".to_string(),
            room_name: "Boardroom A".to_string(),
            location_name: "Downtown".to_string(),
            booking_date: NaiveDate::from_ymd_opt(2026, 9, 15).unwrap(),
            adjusted_price: dec!(325.00),
            status: BookingStatus::Confirmed,
        })
    }

    #[tokio::test]
    async fn test_events_are_delivered_to_sink() {
        let received: Arc<Mutex<Vec<serde_json::Value>>> = Arc::new(Mutex::new(Vec::new()));
        let sink_log = received.clone();

        let router = Router::new()
            .route(
                "/api/notifications",
                post(
                    |State(log): State<Arc<Mutex<Vec<serde_json::Value>>>>,
                     Json(body): Json<serde_json::Value>| async move {
                        log.lock().unwrap().push(body);
                    },
                ),
            )
            .with_state(sink_log);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let dispatcher =
            NotificationDispatcher::start(test_http_client(), format!("http://{}", addr), 16);
        dispatcher.dispatch(sample_event());

        // Give the worker a moment to deliver
        tokio::time::sleep(Duration::from_millis(200)).await;

        let events = received.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["type"], "booking_confirmation");
    }

    #[tokio::test]
    async fn test_dispatch_survives_unreachable_sink() {
        let dispatcher =
            NotificationDispatcher::start(test_http_client(), unreachable_base_url(), 16);

        // Must not panic or block; the failure is absorbed by the worker
        dispatcher.dispatch(sample_event());
        dispatcher.dispatch(sample_event());

        tokio::time::sleep(Duration::from_millis(200)).await;
    }
}
