//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::booking::BookingService;
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::middleware::identity_middleware;
use crate::interfaces::http::modules::metrics::http_metrics_middleware;
use crate::interfaces::http::modules::{bookings, health, locations, metrics, vehicles};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Bookings
        bookings::create_booking,
        bookings::my_bookings,
        bookings::get_booking,
        bookings::mark_arrived,
        // Locations
        locations::location_queue,
        locations::location_bookings,
        locations::queue_status,
        locations::admission_check,
        // Vehicles
        vehicles::create_vehicle,
        vehicles::list_vehicles,
        vehicles::available_vehicles,
        vehicles::get_vehicle,
        vehicles::update_vehicle,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            // Bookings
            bookings::CreateBookingRequest,
            bookings::BookingDto,
            bookings::BookingCreatedResponse,
            bookings::AdmissionRejectionDto,
            // Locations
            locations::QueueEntryDto,
            locations::EstimatedWaitDto,
            locations::QueueStatusDto,
            locations::LocationQueueResponse,
            locations::AdmissionCheckDto,
            // Vehicles
            vehicles::CreateVehicleRequest,
            vehicles::UpdateVehicleRequest,
            vehicles::VehicleDto,
            vehicles::AvailableVehiclesResponse,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Bookings", description = "Charging pre-bookings: admission, lookup and arrival reporting"),
        (name = "Locations", description = "Location queues: ranked entries, occupancy and the capacity gate"),
        (name = "Vehicles", description = "Fleet vehicle registry and booking eligibility"),
    ),
    info(
        title = "FleetEase Pre-Booking API",
        version = "1.0.0",
        description = "REST API for queueing electric fleet vehicles at charging locations",
        license(name = "MIT"),
        contact(name = "FleetEase", email = "support@fleetease.uz")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    booking_service: Arc<BookingService>,
    db: DatabaseConnection,
    metrics_handle: PrometheusHandle,
) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Booking routes (identity required)
    let booking_routes = Router::new()
        .route("/", post(bookings::create_booking))
        .route("/my", get(bookings::my_bookings))
        .route("/{booking_id}", get(bookings::get_booking))
        .route("/{booking_id}/arrived", post(bookings::mark_arrived))
        .layer(middleware::from_fn(identity_middleware))
        .with_state(bookings::BookingAppState {
            service: booking_service.clone(),
        });

    // Location queue routes (identity required)
    let location_routes = Router::new()
        .route("/{location_id}/queue", get(locations::location_queue))
        .route("/{location_id}/bookings", get(locations::location_bookings))
        .route("/{location_id}/queue-status", get(locations::queue_status))
        .route("/{location_id}/admission", get(locations::admission_check))
        .layer(middleware::from_fn(identity_middleware))
        .with_state(locations::LocationAppState {
            service: booking_service.clone(),
        });

    // Vehicle routes (identity required)
    let vehicle_routes = Router::new()
        .route(
            "/",
            get(vehicles::list_vehicles).post(vehicles::create_vehicle),
        )
        .route("/available", get(vehicles::available_vehicles))
        .route(
            "/{vehicle_id}",
            get(vehicles::get_vehicle).put(vehicles::update_vehicle),
        )
        .layer(middleware::from_fn(identity_middleware))
        .with_state(vehicles::VehicleAppState {
            repos,
            service: booking_service,
        });

    // Health (no auth)
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        });

    // Prometheus scrape endpoint (no auth)
    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(metrics::MetricsState {
            handle: metrics_handle,
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health + metrics
        .merge(health_routes)
        .merge(metrics_routes)
        // Bookings
        .nest("/api/v1/bookings", booking_routes)
        // Locations
        .nest("/api/v1/locations", location_routes)
        // Vehicles
        .nest("/api/v1/vehicles", vehicle_routes)
        // Middleware
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
