//! API error types and responses.
//!
//! Every rejected or failed path produces an explicit structured response
//! of the shape `{"error": string, "message"?: string}`. The three
//! authentication rejections share status 401 externally but stay
//! distinguishable internally via their error codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use hearth_auth::AuthError;

/// API error type that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No bearer credential was supplied.
    #[error("bearer token not provided")]
    MissingToken,

    /// Signature verification or structural decode failed.
    #[error("invalid token")]
    InvalidToken,

    /// The token decoded successfully but is past its expiry.
    #[error("token has expired")]
    ExpiredToken,

    /// The inbound body could not be used (e.g. not a JSON object where
    /// identity injection requires one).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The outbound call to an internal service could not be completed.
    #[error("downstream unreachable")]
    DownstreamUnreachable,

    /// No route matches the incoming path.
    #[error("not found")]
    NotFound,

    /// Any other failure in routing or handling logic.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl ApiError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingToken | Self::InvalidToken | Self::ExpiredToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::DownstreamUnreachable | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the internal error code string for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingToken => "missing_token",
            Self::InvalidToken => "invalid_token",
            Self::ExpiredToken => "expired_token",
            Self::BadRequest(_) => "bad_request",
            Self::DownstreamUnreachable => "downstream_unreachable",
            Self::NotFound => "not_found",
            Self::Internal(_) => "internal_error",
        }
    }

    /// The `error` field of the response body.
    const fn kind(&self) -> &'static str {
        match self {
            Self::MissingToken | Self::InvalidToken | Self::ExpiredToken => "Unauthorized",
            Self::BadRequest(_) => "Bad Request",
            Self::NotFound => "Not Found",
            Self::DownstreamUnreachable | Self::Internal(_) => "Internal Server Error",
        }
    }

    /// The optional `message` field of the response body.
    ///
    /// Internal detail never reaches the client; it is logged instead.
    fn message(&self) -> Option<String> {
        match self {
            Self::MissingToken => Some("Bearer token not provided".to_string()),
            Self::InvalidToken => Some("Invalid token".to_string()),
            Self::ExpiredToken => Some("Token has expired".to_string()),
            Self::BadRequest(detail) => Some(detail.clone()),
            Self::DownstreamUnreachable => Some("Downstream service unavailable".to_string()),
            Self::NotFound | Self::Internal(_) => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::DownstreamUnreachable | Self::Internal(_) => {
                tracing::error!(code = self.code(), error = %self, "Gateway error");
            }
            _ => {
                tracing::debug!(code = self.code(), error = %self, "Request rejected");
            }
        }

        let body = ErrorResponse {
            error: self.kind(),
            message: self.message(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidSignature
            | AuthError::InvalidToken(_)
            | AuthError::WrongTokenClass => Self::InvalidToken,
            AuthError::EmptySecret | AuthError::MissingSubject => {
                tracing::error!(error = %err, "Auth configuration error");
                Self::Internal("authentication configuration error".to_string())
            }
        }
    }
}
