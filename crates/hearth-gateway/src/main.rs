//! Hearth Gateway - authenticated reverse proxy
//!
//! This is the main entry point for the gateway service. The gateway
//! verifies bearer access tokens and forwards requests to the internal
//! valuation services, relaying their responses unchanged.
//!
//! # Configuration
//!
//! All configuration comes from the environment:
//!
//! - `LISTEN_ADDR` - listen address (default `0.0.0.0:8080`)
//! - `JWT_SECRET` - shared token signing secret (required)
//! - `AUTH_SERVICE_URL`, `OCR_SERVICE_URL`, `PREDICT_SERVICE_URL`,
//!   `TRAIN_SERVICE_URL`, `SYSTEM_SERVICE_URL` - downstream base URLs
//!   (required)
//! - `CORS_ORIGINS` - comma-separated allowed origins (default none)
//! - `DOWNSTREAM_TIMEOUT_SECONDS` - outbound call timeout (default 30)
//! - `REQUEST_TIMEOUT_SECONDS` - inbound request timeout (default 60)

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hearth_auth::HmacVerifier;
use hearth_gateway::{create_router, DownstreamConfig, GatewayConfig, GatewayState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hearth=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Hearth Gateway");

    // Load configuration from environment
    let config = GatewayConfig::from_env();
    let downstreams = DownstreamConfig::from_env()?;
    let secret = std::env::var("JWT_SECRET").map_err(|_| "JWT_SECRET must be set")?;

    tracing::info!(
        listen_addr = %config.listen_addr,
        cors_origins = ?config.cors_origins,
        downstream_timeout_seconds = config.downstream_timeout_seconds,
        "Gateway configuration loaded"
    );

    // Initialize token verifier
    let verifier = Arc::new(HmacVerifier::new(&secret)?);
    tracing::info!("Token verifier initialized");

    // Build gateway state and router
    let listen_addr = config.listen_addr.clone();
    let state = GatewayState::new(verifier, downstreams, config)?;
    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
