//! Gateway application state.
//!
//! This module defines the shared state that is available to all request
//! handlers. Nothing in it is mutable after startup, so concurrent
//! requests need no coordination.

use std::sync::Arc;

use hearth_auth::TokenVerifier;

use crate::config::{DownstreamConfig, GatewayConfig};
use crate::error::ApiError;
use crate::proxy::ProxyClient;

/// Shared application state for the gateway.
pub struct GatewayState<V>
where
    V: TokenVerifier,
{
    /// The token verifier for authentication.
    pub verifier: Arc<V>,
    /// The outbound HTTP client over the configured downstream services.
    pub proxy: ProxyClient,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl<V> GatewayState<V>
where
    V: TokenVerifier,
{
    /// Create a new gateway state.
    ///
    /// # Errors
    ///
    /// Returns an error if the outbound HTTP client cannot be built.
    pub fn new(
        verifier: Arc<V>,
        downstreams: DownstreamConfig,
        config: GatewayConfig,
    ) -> Result<Self, ApiError> {
        let proxy = ProxyClient::new(downstreams, config.downstream_timeout())?;
        Ok(Self {
            verifier,
            proxy,
            config,
        })
    }
}

impl<V> Clone for GatewayState<V>
where
    V: TokenVerifier,
{
    fn clone(&self) -> Self {
        Self {
            verifier: Arc::clone(&self.verifier),
            proxy: self.proxy.clone(),
            config: self.config.clone(),
        }
    }
}
