//! REST API server module
//!
//! Provides an OpenAPI-documented REST API over the stored runs and seller
//! entries, plus manual triggers for the crawl workflow. The surface is the
//! read/trigger projection only; all crawl logic lives in the executor.

use crate::config::Config;
use crate::db::Database;
use crate::executor::RunExecutor;
use crate::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod error_response;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::AppState;

/// Create the API router with all route definitions
///
/// # Routes
///
/// ## Runs
/// - `GET /runs` - List runs (optional `date` filter)
/// - `GET /runs/:id` - Get a single run
/// - `POST /runs/schedule` - Create a SCHEDULED run and trigger execution
/// - `POST /runs/execute` - Execute the oldest SCHEDULED run now
///
/// ## Sellers
/// - `GET /sellers` - Seller entries for a publisher domain
///
/// ## Stats
/// - `GET /stats` - Average run execution time over a date range
///
/// ## System
/// - `GET /health` - Health check
/// - `GET /openapi.json` - OpenAPI specification
/// - `GET /swagger-ui` - Interactive Swagger UI documentation (if enabled)
pub fn create_router(
    db: Arc<Database>,
    executor: Arc<RunExecutor>,
    config: Arc<Config>,
) -> Router {
    let state = AppState::new(db, executor, config.clone());

    let router = Router::new()
        // Runs
        .route("/runs", get(routes::list_runs))
        .route("/runs/:id", get(routes::get_run))
        .route("/runs/schedule", post(routes::schedule_run))
        .route("/runs/execute", post(routes::execute_run))
        // Sellers
        .route("/sellers", get(routes::list_sellers))
        // Stats
        .route("/stats", get(routes::get_stats))
        // System
        .route("/health", get(routes::health_check))
        .route("/openapi.json", get(routes::openapi_spec));

    // Merge Swagger UI routes if enabled in config (before applying state)
    let router = if config.api.enable_swagger_ui {
        router.merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
    } else {
        router
    };

    let router = router.with_state(state);

    // Permissive CORS: the API carries no credentials and serves local tooling
    router.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

/// Start the API server on the configured bind address
///
/// Binds a TCP listener and serves the router until the server stops.
pub async fn start_api_server(
    db: Arc<Database>,
    executor: Arc<RunExecutor>,
    config: Arc<Config>,
) -> Result<()> {
    let bind_address = config.api.bind_address;

    tracing::info!(address = %bind_address, "Starting API server");

    let app = create_router(db, executor, config);

    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(crate::error::Error::Io)?;

    axum::serve(listener, app)
        .await
        .map_err(|e| crate::error::Error::ApiServerError(e.to_string()))?;

    tracing::info!("API server stopped");
    Ok(())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
