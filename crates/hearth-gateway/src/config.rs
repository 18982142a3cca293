//! Gateway configuration types.
//!
//! Downstream base URLs are resolved once at startup and injected into
//! the router explicitly, never read from ambient environment state at
//! request time.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the gateway service.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Listen address (e.g., "0.0.0.0:8080").
    #[serde(default = "GatewayConfig::default_listen_addr")]
    pub listen_addr: String,

    /// Allowed CORS origins. Empty by default: cross-origin access must
    /// be opted into explicitly, `"*"` enables any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    #[serde(default = "GatewayConfig::default_max_body")]
    pub max_body_bytes: usize,

    /// Inbound request timeout in seconds.
    #[serde(default = "GatewayConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Timeout for outbound calls to internal services, in seconds.
    #[serde(default = "GatewayConfig::default_downstream_timeout")]
    pub downstream_timeout_seconds: u64,
}

impl GatewayConfig {
    fn default_listen_addr() -> String {
        "0.0.0.0:8080".to_string()
    }

    const fn default_max_body() -> usize {
        1024 * 1024 // 1 MB
    }

    const fn default_request_timeout() -> u64 {
        60
    }

    const fn default_downstream_timeout() -> u64 {
        30
    }

    /// Get the inbound request timeout as a `Duration`.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Get the downstream call timeout as a `Duration`.
    #[must_use]
    pub fn downstream_timeout(&self) -> Duration {
        Duration::from_secs(self.downstream_timeout_seconds)
    }

    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("LISTEN_ADDR") {
            config.listen_addr = addr;
        }
        if let Ok(origins) = std::env::var("CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(ToString::to_string)
                .collect();
        }
        if let Some(timeout) = parse_env("DOWNSTREAM_TIMEOUT_SECONDS") {
            config.downstream_timeout_seconds = timeout;
        }
        if let Some(timeout) = parse_env("REQUEST_TIMEOUT_SECONDS") {
            config.request_timeout_seconds = timeout;
        }

        config
    }
}

fn parse_env(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: Self::default_listen_addr(),
            cors_origins: Vec::new(),
            max_body_bytes: Self::default_max_body(),
            request_timeout_seconds: Self::default_request_timeout(),
            downstream_timeout_seconds: Self::default_downstream_timeout(),
        }
    }
}

/// An internal service the gateway forwards to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Downstream {
    /// Internal auth service (token renewal and revocation).
    Auth,
    /// OCR document analysis service.
    Ocr,
    /// Price prediction service.
    Predict,
    /// Report storage / training service.
    Train,
    /// System health service.
    System,
}

impl Downstream {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Ocr => "ocr",
            Self::Predict => "predict",
            Self::Train => "train",
            Self::System => "system",
        }
    }
}

/// Base URLs of the internal services, one per [`Downstream`].
///
/// Built once at process start, immutable thereafter and shared
/// read-only by every request handler.
#[derive(Debug, Clone, Deserialize)]
pub struct DownstreamConfig {
    /// Base URL of the internal auth service.
    pub auth_base_url: String,
    /// Base URL of the OCR analysis service.
    pub ocr_base_url: String,
    /// Base URL of the price prediction service.
    pub predict_base_url: String,
    /// Base URL of the report storage service.
    pub train_base_url: String,
    /// Base URL of the system health service.
    pub system_base_url: String,
}

impl DownstreamConfig {
    /// Resolve the base URL for a downstream target.
    #[must_use]
    pub fn base_url(&self, target: Downstream) -> &str {
        match target {
            Downstream::Auth => &self.auth_base_url,
            Downstream::Ocr => &self.ocr_base_url,
            Downstream::Predict => &self.predict_base_url,
            Downstream::Train => &self.train_base_url,
            Downstream::System => &self.system_base_url,
        }
    }

    /// Load downstream base URLs from environment variables.
    ///
    /// # Errors
    ///
    /// Returns the name of the first missing variable.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            auth_base_url: require_env("AUTH_SERVICE_URL")?,
            ocr_base_url: require_env("OCR_SERVICE_URL")?,
            predict_base_url: require_env("PREDICT_SERVICE_URL")?,
            train_base_url: require_env("TRAIN_SERVICE_URL")?,
            system_base_url: require_env("SYSTEM_SERVICE_URL")?,
        })
    }

    /// A configuration with every service pointed at the same base URL.
    /// Intended for tests against a single stub server.
    #[must_use]
    pub fn single_base(base_url: &str) -> Self {
        Self {
            auth_base_url: base_url.to_string(),
            ocr_base_url: base_url.to_string(),
            predict_base_url: base_url.to_string(),
            train_base_url: base_url.to_string(),
            system_base_url: base_url.to_string(),
        }
    }
}

fn require_env(name: &str) -> Result<String, String> {
    std::env::var(name).map_err(|_| format!("missing required environment variable {name}"))
}
