//! Router configuration.
//!
//! This module composes the public routes, the authenticated proxy
//! routes and the catch-all handlers into the Axum router.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use hearth_auth::TokenVerifier;

use crate::config::Downstream;
use crate::error::ApiError;
use crate::handlers::{health, identity};
use crate::jobs::{public_write_job, read_job, write_job};
use crate::state::GatewayState;

/// Create the gateway router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Gateway liveness
/// - `POST /auth/renew` - Exchange a refresh token for a new pair
///
/// ## Authenticated (Bearer access token)
/// - `POST /api/auth/logout` - Revoke the caller's tokens
/// - `GET /api/auth/me` - The caller's resolved identity
/// - `POST /api/ocr/analysis` - OCR document analysis
/// - `POST /api/predict` - Price prediction
/// - `POST /api/train/reports` - Store a valuation report
/// - `GET /api/train/reports` - List valuation reports
/// - `GET /api/train/reports/:id` - Fetch one valuation report
/// - `GET /api/admin/health` - Internal system health
pub fn create_router<V>(state: GatewayState<V>) -> Router
where
    V: TokenVerifier + 'static,
{
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout = state.config.request_timeout();

    // Build CORS layer
    let cors = build_cors_layer(&cors_origins);

    // Build the router
    let state = Arc::new(state);

    Router::new()
        // Public
        .route("/health", get(health::health))
        .route("/auth/renew", public_write_job(Downstream::Auth, "/auth/renew"))
        // Identity
        .route("/api/auth/logout", write_job(Downstream::Auth, "/auth/revoke"))
        .route("/api/auth/me", get(identity::me))
        // Business services
        .route("/api/ocr/analysis", write_job(Downstream::Ocr, "/analysis"))
        .route("/api/predict", write_job(Downstream::Predict, "/predict"))
        .route(
            "/api/train/reports",
            write_job(Downstream::Train, "/api/reports")
                .merge(read_job(Downstream::Train, "/api/reports")),
        )
        .route(
            "/api/train/reports/:id",
            read_job(Downstream::Train, "/api/reports/:id"),
        )
        // Admin
        .route(
            "/api/admin/health",
            read_job(Downstream::System, "/system/health"),
        )
        // Catch-all
        .fallback(not_found)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}

/// Fallback for unmatched paths.
async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Build the CORS layer from configured origins.
///
/// No origins means no cross-origin access; the wildcard has to be
/// configured explicitly.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
