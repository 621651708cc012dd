//! # Meets API
//!
//! The API crate provides the web server for the meets scheduling service.
//! It exposes endpoints to book, change, list and delete meets and to read
//! an organizer's occupancy.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate HTTP requests into [`meets_core::service::MeetService`] calls
//! - **Middleware**: Authentication against the identity service and error mapping
//! - **Config**: Environment-driven settings
//!
//! The API uses Axum as the web framework and SQLx for database interactions.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{Router, http::HeaderValue};
use eyre::Result;
use meets_core::service::MeetService;
use meets_db::PgMeetRepository;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::middleware::auth::{IdentityProvider, RemoteIdentityProvider};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Scheduling service wired to the persistence backend
    pub meets: MeetService,
    /// Resolves bearer tokens into authenticated users
    pub identity: Arc<dyn IdentityProvider>,
}

/// Builds the router with all routes; everything under `/api` requires authentication.
pub fn router(state: Arc<ApiState>) -> Router {
    let protected = Router::new()
        .merge(routes::meets::routes())
        .merge(routes::availability::routes())
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(routes::health::routes())
        .merge(protected)
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// Initializes logging, wires the PostgreSQL repository and the identity
/// service client into [`ApiState`], applies CORS, tracing and timeout layers
/// and serves until the listener fails.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let repository = Arc::new(PgMeetRepository::new(db_pool));
    let state = Arc::new(ApiState {
        meets: MeetService::new(repository).with_timeout(config.db_timeout()),
        identity: Arc::new(RemoteIdentityProvider::new(
            config.auth_service_url.clone(),
            config.elevated_role.clone(),
        )),
    });

    let app = router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let allowed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();

        let cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(allowed)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
