//! Token issuance and verification for the hearth gateway.
//!
//! This crate provides the stateless token lifecycle used by the gateway:
//!
//! - HS256 signing of access and refresh tokens with fixed TTLs
//! - Signature and structural verification via the [`TokenVerifier`] trait
//! - A pure expiry check, kept separate from the cryptographic step
//!
//! Tokens are never stored server-side; validity is derived solely from
//! the signature and the `exp` claim.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use hearth_auth::{HmacVerifier, SubjectId, TokenSigner, TokenVerifier, expiry};
//!
//! # fn example() -> Result<(), hearth_auth::AuthError> {
//! let signer = TokenSigner::new("a-signing-secret")?;
//! let token = signer.issue_access(&SubjectId::new("u-1"), Utc::now())?;
//!
//! let verifier = HmacVerifier::new("a-signing-secret")?;
//! let claims = verifier.verify(&token)?;
//! assert!(!expiry::is_expired(&claims, Utc::now()));
//! assert_eq!(claims.subject.as_str(), "u-1");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod expiry;
pub mod token;

pub use error::{AuthError, Result};
pub use token::{
    HmacVerifier, SubjectId, TokenClaims, TokenClass, TokenSigner, TokenVerifier,
    ACCESS_TOKEN_TTL_SECS, REFRESH_TOKEN_TTL_SECS,
};

#[cfg(any(test, feature = "test-utils"))]
pub use token::MockVerifier;
