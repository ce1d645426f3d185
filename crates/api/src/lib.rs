//! # FieldSync API
//!
//! The API crate provides the web server implementation for the FieldSync
//! dispatch service. It defines RESTful endpoints for scheduling jobs,
//! checking technician availability, and managing notification
//! preferences, and runs the auto-completion sweeper in the background.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Scheduling**: The availability checker, job scheduler, and sweeper
//! - **External**: Collaborator traits for address resolution and
//!   notification delivery
//! - **Middleware**: Error mapping shared by all handlers
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework and SQLx for database
//! interactions.

/// Configuration module for API settings
pub mod config;
/// External collaborator interfaces (address resolver, notifier)
pub mod external;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;
/// The scheduling engine
pub mod scheduling;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use external::{AddressResolver, GoogleGeocoder, LoggingNotifier, Notifier};

/// Shared application state that is accessible to all request handlers.
///
/// Besides the connection pool this carries the external collaborators,
/// so handlers and the scheduler see traits rather than concrete
/// services.
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
    /// Address parsing/geocoding collaborator
    pub resolver: Arc<dyn AddressResolver>,
    /// Best-effort notification collaborator
    pub notifier: Arc<dyn Notifier>,
}

/// Starts the API server with the provided configuration and database
/// connection, and spawns the auto-completion sweeper.
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and sweeper cadence
/// * `db_pool` - PostgreSQL connection pool for database operations
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create shared state with dependencies
    let state = Arc::new(ApiState {
        db_pool: db_pool.clone(),
        resolver: Arc::new(GoogleGeocoder::new(config.google_maps_api_key.clone())),
        notifier: Arc::new(LoggingNotifier),
    });

    // Background sweeper: advances ASSIGNED jobs whose slot has elapsed
    tokio::spawn(scheduling::sweeper::run(
        db_pool,
        Duration::from_secs(config.sweep_interval),
    ));

    // Build the application router with all routes
    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Job scheduling and query endpoints
        .merge(routes::jobs::routes())
        // Availability endpoints
        .merge(routes::availability::routes())
        // Technician and time slot administration
        .merge(routes::technicians::routes())
        .merge(routes::time_slots::routes())
        // Notification preference endpoints
        .merge(routes::preferences::routes())
        // Attach shared state to all routes
        .with_state(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::PATCH,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(
                origins
                    .iter()
                    .filter_map(|origin| origin.parse::<axum::http::HeaderValue>().ok())
                    .collect::<Vec<_>>(),
            )
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(axum::error_handling::HandleErrorLayer::new(
                |_: tower::BoxError| async { axum::http::StatusCode::REQUEST_TIMEOUT },
            ))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
