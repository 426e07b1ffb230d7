//! PDF toolbox API
//!
//! Stateless HTTP endpoints over pdftools-core: merge, split, compress, and
//! image-to-PDF conversion, each a multipart upload in and raw PDF bytes out.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod state;
pub mod upload;

pub use state::AppState;

/// Build the application router.
pub fn app(state: Arc<AppState>) -> Router {
    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/merge", post(handlers::merge))
        .route("/api/split", post(handlers::split))
        .route("/api/compress", post(handlers::compress))
        .route("/api/jpg-to-pdf", post(handlers::jpg_to_pdf))
        .layer(DefaultBodyLimit::max(state.limits.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
