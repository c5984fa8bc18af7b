mod bookings;
mod catalog;
mod config;
mod db;
mod identity;
mod notifications;
mod validation;
mod weather;

use axum::{
    extract::FromRef,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::time::Duration;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use bookings::{
    AvailabilityResponse, Booking, BookingCreated, BookingService, BookingStatus,
    BookingsRepository, CreateBookingRequest, PriceBreakdown, PriceCalculator,
};
use catalog::CatalogClient;
use config::AppConfig;
use identity::IdentityClient;
use notifications::NotificationDispatcher;
use weather::WeatherClient;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        bookings::handlers::create_booking_handler,
        bookings::handlers::list_all_bookings_handler,
        bookings::handlers::get_booking_handler,
        bookings::handlers::cancel_booking_handler,
        bookings::handlers::get_user_bookings_handler,
        bookings::handlers::check_availability_handler,
    ),
    components(
        schemas(
            Booking,
            BookingStatus,
            BookingCreated,
            CreateBookingRequest,
            PriceBreakdown,
            AvailabilityResponse
        )
    ),
    tags(
        (name = "bookings", description = "Room booking endpoints")
    ),
    info(
        title = "Room Booking API",
        version = "1.0.0",
        description = "RESTful API for booking conference rooms with weather-driven dynamic pricing"
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub bookings: BookingService,
    pub identity: IdentityClient,
}

impl FromRef<AppState> for IdentityClient {
    fn from_ref(state: &AppState) -> Self {
        state.identity.clone()
    }
}

/// Handler for GET /health
async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Fallback for unknown routes
async fn not_found_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found" })),
    )
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS middleware
pub fn create_router(state: AppState) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // API routes
        .route("/health", get(health_handler))
        .route("/api/bookings", post(bookings::create_booking_handler))
        .route("/api/bookings", get(bookings::list_all_bookings_handler))
        .route("/api/bookings/:booking_id", get(bookings::get_booking_handler))
        .route(
            "/api/bookings/:booking_id/cancel",
            post(bookings::cancel_booking_handler),
        )
        .route(
            "/api/bookings/user/:user_id",
            get(bookings::get_user_bookings_handler),
        )
        .route(
            "/api/rooms/:room_id/availability",
            get(bookings::check_availability_handler),
        )
        .fallback(not_found_handler)
        .layer(cors)
        .with_state(state)
}

/// Wire the service graph from configuration and a database pool
pub fn build_state(config: &AppConfig, pool: sqlx::PgPool) -> AppState {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.upstream_timeout_secs))
        .build()
        .expect("Failed to build HTTP client");

    let identity = IdentityClient::new(http.clone(), config.identity_base_url.clone());
    let catalog = CatalogClient::new(http.clone(), config.catalog_base_url.clone());
    let weather = WeatherClient::new(
        http.clone(),
        config.weather_base_url.clone(),
        config.comfortable_temperature,
        Duration::from_secs(config.forecast_cache_ttl_secs),
    );
    let notifier = NotificationDispatcher::start(
        http,
        config.notification_base_url.clone(),
        config.notification_queue_capacity,
    );
    let pricing = PriceCalculator::new(config.comfortable_temperature, config.adjustment_factor);

    let bookings = BookingService::new(
        BookingsRepository::new(pool),
        catalog,
        weather,
        pricing,
        notifier,
    );

    AppState { bookings, identity }
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Room Booking API - Starting...");

    let config = AppConfig::from_env();

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    let addr = format!("{}:{}", config.host, config.port);
    let state = build_state(&config, db_pool);
    let app = create_router(state);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Room Booking API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}

#[cfg(test)]
mod tests;
