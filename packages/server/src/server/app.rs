//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::analyzer::AffinityAnalyzer;
use crate::server::middleware::extract_client_ip;
use crate::server::routes::{analyze_handler, health_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<AffinityAnalyzer>,
}

/// Build the Axum application router
///
/// The service is open by design (the original deployment disabled CSRF and
/// authentication entirely), so CORS is permissive and there is no auth
/// layer.
pub fn build_app(analyzer: AffinityAnalyzer) -> Router {
    let state = AppState {
        analyzer: Arc::new(analyzer),
    };

    Router::new()
        .route("/health", get(health_handler))
        .route("/analyze", post(analyze_handler))
        .layer(middleware::from_fn(extract_client_ip))
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
