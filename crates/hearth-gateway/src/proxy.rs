//! Downstream path templates and the outbound proxy client.
//!
//! The gateway never inspects downstream payload semantics: it resolves
//! a path, issues exactly one outbound call, and relays the status and
//! body verbatim. A transport failure is the only thing translated into
//! a gateway-originated error.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use hearth_auth::SubjectId;

use crate::config::{Downstream, DownstreamConfig};
use crate::error::ApiError;

/// A downstream path pattern of literal segments and named parameters,
/// e.g. `/train/reports/:id`.
///
/// Parameters are whole segments, so resolving `id` can never touch a
/// literal that merely contains the substring `id`.
#[derive(Debug, Clone)]
pub struct PathTemplate {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Param(String),
}

impl PathTemplate {
    /// Parse a template from a `/`-separated pattern. Segments starting
    /// with `:` become named parameters.
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.strip_prefix(':').map_or_else(
                    || Segment::Literal(s.to_string()),
                    |name| Segment::Param(name.to_string()),
                )
            })
            .collect();

        Self { segments }
    }

    /// Resolve the template against the request's path parameters.
    ///
    /// # Errors
    ///
    /// A parameter missing from `params` means the route and its binding
    /// disagree, which is a wiring bug and surfaces as an internal error.
    pub fn resolve(&self, params: &HashMap<String, String>) -> Result<String, ApiError> {
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(lit) => path.push_str(lit),
                Segment::Param(name) => {
                    let value = params.get(name).ok_or_else(|| {
                        ApiError::Internal(format!("unresolved path parameter :{name}"))
                    })?;
                    path.push_str(value);
                }
            }
        }
        Ok(path)
    }
}

/// A relayed downstream response: the downstream's own status code and
/// body, passed through unchanged.
#[derive(Debug)]
pub struct ProxyResponse {
    status: StatusCode,
    body: Bytes,
}

impl ProxyResponse {
    /// The relayed status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            self.body,
        )
            .into_response()
    }
}

/// Outbound HTTP client over the configured downstream services.
///
/// One client instance is shared by all handlers; its connection pool is
/// the only cross-request state in the gateway. Every call is bounded by
/// the configured timeout, and dropping a handler future cancels the
/// in-flight outbound call with it.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: reqwest::Client,
    downstreams: DownstreamConfig,
}

impl ProxyClient {
    /// Create a client over the given downstream base URLs.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        downstreams: DownstreamConfig,
        timeout: std::time::Duration,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            downstreams,
        })
    }

    /// Issue a GET to `target` at `path_and_query` and relay the result.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::DownstreamUnreachable`] if the call cannot be
    /// completed. A non-2xx downstream status is NOT an error here; it
    /// is relayed as-is so the caller sees the true downstream failure.
    pub async fn get(
        &self,
        target: Downstream,
        path_and_query: &str,
    ) -> Result<ProxyResponse, ApiError> {
        let url = format!("{}{path_and_query}", self.downstreams.base_url(target));
        tracing::debug!(service = target.name(), path = path_and_query, "Forwarding GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| unreachable(target, &e))?;

        relay(target, response).await
    }

    /// Issue a POST with a JSON body to `target` at `path` and relay the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::DownstreamUnreachable`] if the call cannot be
    /// completed.
    pub async fn post_json(
        &self,
        target: Downstream,
        path: &str,
        body: Vec<u8>,
    ) -> Result<ProxyResponse, ApiError> {
        let url = format!("{}{path}", self.downstreams.base_url(target));
        tracing::debug!(service = target.name(), path, "Forwarding POST");

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| unreachable(target, &e))?;

        relay(target, response).await
    }
}

async fn relay(target: Downstream, response: reqwest::Response) -> Result<ProxyResponse, ApiError> {
    // reqwest and axum may pin different `http` versions, so carry the
    // status over by value.
    let status = StatusCode::from_u16(response.status().as_u16())
        .map_err(|e| ApiError::Internal(format!("invalid downstream status: {e}")))?;

    let body = response
        .bytes()
        .await
        .map_err(|e| unreachable(target, &e))?;

    Ok(ProxyResponse { status, body })
}

// The response body never names the downstream; the detail goes to the
// server log only.
fn unreachable(target: Downstream, err: &dyn std::fmt::Display) -> ApiError {
    tracing::error!(service = target.name(), error = %err, "Downstream call failed");
    ApiError::DownstreamUnreachable
}

/// Shallow-merge the authenticated caller's identity into a JSON object
/// body as `callerId`, overwriting any client-supplied field of that
/// name.
///
/// # Errors
///
/// Returns `ApiError::BadRequest` if the body is not a JSON object.
pub fn inject_caller_id(body: &[u8], subject: &SubjectId) -> Result<Vec<u8>, ApiError> {
    let mut value: Value = serde_json::from_slice(body)
        .map_err(|_| ApiError::BadRequest("Request body must be a JSON object".to_string()))?;

    let Some(object) = value.as_object_mut() else {
        return Err(ApiError::BadRequest(
            "Request body must be a JSON object".to_string(),
        ));
    };

    object.insert(
        "callerId".to_string(),
        Value::String(subject.as_str().to_string()),
    );

    serde_json::to_vec(&value).map_err(|e| ApiError::Internal(e.to_string()))
}
