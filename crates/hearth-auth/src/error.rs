//! Authentication error types.

use thiserror::Error;

/// A result type using `AuthError`.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur during token issuance or verification.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token signature does not verify against the configured secret.
    #[error("invalid signature")]
    InvalidSignature,

    /// The token is structurally malformed or carries unusable claims.
    #[error("invalid token format: {0}")]
    InvalidToken(String),

    /// A refresh token was presented where an access token is required.
    #[error("wrong token class")]
    WrongTokenClass,

    /// The signing secret is empty. This is a configuration bug, not a
    /// runtime-recoverable condition.
    #[error("signing secret must not be empty")]
    EmptySecret,

    /// The subject identifier is empty at issuance.
    #[error("subject identifier must not be empty")]
    MissingSubject,
}

impl AuthError {
    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidSignature | Self::InvalidToken(_) | Self::WrongTokenClass => 401,
            Self::EmptySecret | Self::MissingSubject => 500,
        }
    }
}
