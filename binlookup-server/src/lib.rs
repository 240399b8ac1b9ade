//! binlookup HTTP server - BIN metadata lookups over HTTP
//!
//! Serves `GET /:bin`, answering every request with HTTP 200, a JSON
//! envelope and a public one-day `Cache-Control` header.

pub mod api;
pub mod handlers;
pub mod metrics;
pub mod state;
pub mod telemetry;

pub use api::{BinData, LookupOutcome, LookupResponse, CACHE_CONTROL_VALUE};
pub use state::AppState;

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::lookup_root))
        .route("/:bin", get(handlers::lookup_bin))
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
