// In crates/web-server/src/lib.rs

use app_config::ServerSettings;
use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};
use core_types::{MarketSnapshot, Symbol};
use engine::SnapshotAssembler;
use std::sync::Arc;
use tokio::net::TcpListener;
use types::SnapshotParams;

pub mod error;
pub mod types;

// Re-export our custom error type for convenience.
pub use error::{Error, Result};

/// The shared application state that is available to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub assembler: Arc<SnapshotAssembler>,
}

/// Creates the main application router with all routes and middleware.
pub fn create_router(app_state: AppState) -> Router {
    // The display surface may be served from another origin.
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    let api_router = Router::new().route("/snapshot", get(snapshot_handler));

    Router::new()
        .route("/", get(snapshot_handler))
        .route("/health", get(health_check_handler))
        .nest("/api", api_router)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// A simple health check handler.
async fn health_check_handler() -> &'static str {
    "OK"
}

/// The handler for `GET /` and `GET /api/snapshot?symbol=..`.
async fn snapshot_handler(
    State(state): State<AppState>,
    Query(params): Query<SnapshotParams>,
) -> Result<Json<MarketSnapshot>> {
    let symbol = match params.symbol.as_deref() {
        Some(raw) => Symbol::parse(raw)?,
        None => state.assembler.default_symbol().clone(),
    };
    Ok(Json(state.assembler.snapshot(&symbol).await))
}

/// The main entry point for running the web server.
///
/// Serves until the process receives Ctrl-C.
pub async fn run(settings: &ServerSettings, assembler: Arc<SnapshotAssembler>) -> Result<()> {
    let app = create_router(AppState { assembler });

    let address = format!("{}:{}", settings.host, settings.port);
    let listener = TcpListener::bind(&address)
        .await
        .map_err(Error::ServerBindError)?;
    tracing::info!(address = %address, "Web server listening.");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Error::ServeError)?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal.");
    }
}
