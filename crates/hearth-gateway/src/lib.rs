//! Authenticated reverse-proxy gateway for internal valuation services.
//!
//! The gateway sits in front of a set of internal HTTP services (OCR
//! analysis, price prediction, report storage, system health) and:
//!
//! - verifies bearer access tokens on every authenticated route
//! - forwards request bodies to the matching internal service, with the
//!   caller's identity injected into write bodies
//! - relays the downstream status and body back unchanged
//!
//! It holds no per-request state beyond the single outbound call, never
//! retries, and never inspects downstream payload semantics.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                      Clients                          │
//! └──────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌──────────────────────────────────────────────────────┐
//! │                   hearth-gateway                      │
//! │  ┌───────────┐  ┌───────────┐  ┌──────────────────┐  │
//! │  │  AuthUser │  │  Router   │  │   Proxy jobs     │  │
//! │  │ extractor │  │ + fallback│  │ (read / write)   │  │
//! │  └───────────┘  └───────────┘  └──────────────────┘  │
//! └──────────────────────────────────────────────────────┘
//!                           │
//!          ┌────────┬───────┼────────┬──────────┐
//!          ▼        ▼       ▼        ▼          ▼
//!       ┌──────┐ ┌─────┐ ┌───────┐ ┌───────┐ ┌────────┐
//!       │ auth │ │ OCR │ │predict│ │ train │ │ system │
//!       └──────┘ └─────┘ └───────┘ └───────┘ └────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use hearth_auth::HmacVerifier;
//! use hearth_gateway::{create_router, DownstreamConfig, GatewayConfig, GatewayState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GatewayConfig::default();
//! let downstreams = DownstreamConfig::from_env()?;
//! let verifier = Arc::new(HmacVerifier::new("a-signing-secret")?);
//!
//! let state = GatewayState::new(verifier, downstreams, config)?;
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod jobs;
pub mod proxy;
pub mod routes;
pub mod state;

pub use config::{Downstream, DownstreamConfig, GatewayConfig};
pub use error::ApiError;
pub use routes::create_router;
pub use state::GatewayState;

// Re-export key types for convenience
pub use auth::AuthUser;
