//! Token codec, issuer and verification.
//!
//! Tokens are HS256-signed JWTs with three claims: `sub` (the opaque
//! subject identifier), `exp` (absolute unix seconds) and `type` (the
//! token class; absent on the wire means `access`). A token is immutable
//! once signed and the gateway keeps no record of it.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, Result};

/// Access token lifetime: 12 hours.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 12 * 60 * 60;

/// Refresh token lifetime: 12 days.
pub const REFRESH_TOKEN_TTL_SECS: i64 = 12 * 24 * 60 * 60;

/// Opaque identifier of an authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    /// Create a subject identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The class of a token.
///
/// Refresh tokens are tagged distinctly at issuance so they can never be
/// mistaken for access tokens. An absent marker on the wire means
/// `access`, and `access` is omitted when encoding for compatibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenClass {
    /// Short-lived credential required on every authenticated route.
    #[default]
    Access,
    /// Long-lived credential exchanged for a new token pair.
    Refresh,
}

impl TokenClass {
    /// Lifetime of tokens of this class, in seconds.
    #[must_use]
    pub const fn ttl_secs(self) -> i64 {
        match self {
            Self::Access => ACCESS_TOKEN_TTL_SECS,
            Self::Refresh => REFRESH_TOKEN_TTL_SECS,
        }
    }

    fn is_access(&self) -> bool {
        matches!(self, Self::Access)
    }
}

/// Decoded token payload.
///
/// Expiry is deliberately NOT validated during decode; callers apply
/// [`crate::expiry::is_expired`] against their own clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject identifier of the authenticated principal.
    #[serde(rename = "sub")]
    pub subject: SubjectId,
    /// Absolute expiry, unix seconds. Set once at issuance, never mutated.
    #[serde(rename = "exp")]
    pub expires_at: i64,
    /// Token class marker.
    #[serde(rename = "type", default, skip_serializing_if = "TokenClass::is_access")]
    pub class: TokenClass,
}

/// Trait for verifying signed tokens.
///
/// Implementations check the signature and decode the payload, nothing
/// more. This is the seam the gateway mocks in tests.
pub trait TokenVerifier: Send + Sync {
    /// Verify a token's signature and decode its claims.
    ///
    /// # Errors
    ///
    /// Returns an error if the signature does not verify or the payload
    /// is structurally malformed.
    fn verify(&self, token: &str) -> Result<TokenClaims>;
}

/// Issues signed access and refresh tokens.
pub struct TokenSigner {
    key: EncodingKey,
}

impl TokenSigner {
    /// Create a signer over the given shared secret.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmptySecret`] if the secret is empty.
    pub fn new(secret: &str) -> Result<Self> {
        if secret.is_empty() {
            return Err(AuthError::EmptySecret);
        }
        Ok(Self {
            key: EncodingKey::from_secret(secret.as_bytes()),
        })
    }

    /// Issue a short-lived access token for `subject`.
    ///
    /// The expiry is exactly `now + ACCESS_TOKEN_TTL_SECS`.
    ///
    /// # Errors
    ///
    /// Returns an error if the subject is empty or signing fails.
    pub fn issue_access(&self, subject: &SubjectId, now: DateTime<Utc>) -> Result<String> {
        self.issue(subject, TokenClass::Access, now)
    }

    /// Issue a long-lived refresh token for `subject`, tagged with the
    /// `refresh` class marker.
    ///
    /// # Errors
    ///
    /// Returns an error if the subject is empty or signing fails.
    pub fn issue_refresh(&self, subject: &SubjectId, now: DateTime<Utc>) -> Result<String> {
        self.issue(subject, TokenClass::Refresh, now)
    }

    fn issue(&self, subject: &SubjectId, class: TokenClass, now: DateTime<Utc>) -> Result<String> {
        if subject.is_empty() {
            return Err(AuthError::MissingSubject);
        }

        let claims = TokenClaims {
            subject: subject.clone(),
            expires_at: now.timestamp() + class.ttl_secs(),
            class,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

/// Shared-secret HS256 verifier.
pub struct HmacVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl HmacVerifier {
    /// Create a verifier over the given shared secret.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmptySecret`] if the secret is empty.
    pub fn new(secret: &str) -> Result<Self> {
        if secret.is_empty() {
            return Err(AuthError::EmptySecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by the caller against an injectable clock.
        validation.validate_exp = false;

        Ok(Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }
}

impl TokenVerifier for HmacVerifier {
    fn verify(&self, token: &str) -> Result<TokenClaims> {
        let data = decode::<TokenClaims>(token, &self.key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(data.claims)
    }
}

/// A mock verifier for testing.
///
/// Accepts any token in the format `test-token:<subject>` and fabricates
/// unexpired access claims for it.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct MockVerifier;

#[cfg(any(test, feature = "test-utils"))]
impl TokenVerifier for MockVerifier {
    fn verify(&self, token: &str) -> Result<TokenClaims> {
        let subject = token
            .strip_prefix("test-token:")
            .ok_or_else(|| AuthError::InvalidToken("expected test-token:<subject>".to_string()))?;

        if subject.is_empty() {
            return Err(AuthError::InvalidToken(
                "expected test-token:<subject>".to_string(),
            ));
        }

        Ok(TokenClaims {
            subject: SubjectId::new(subject),
            expires_at: Utc::now().timestamp() + ACCESS_TOKEN_TTL_SECS,
            class: TokenClass::Access,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SECRET: &str = "unit-test-secret";

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn access_token_expiry_is_exact() {
        let signer = TokenSigner::new(SECRET).unwrap();
        let verifier = HmacVerifier::new(SECRET).unwrap();
        let now = fixed_now();

        let token = signer.issue_access(&SubjectId::new("u-1"), now).unwrap();
        let claims = verifier.verify(&token).unwrap();

        assert_eq!(claims.expires_at, now.timestamp() + 43_200);
    }

    #[test]
    fn refresh_token_expiry_is_exact() {
        let signer = TokenSigner::new(SECRET).unwrap();
        let verifier = HmacVerifier::new(SECRET).unwrap();
        let now = fixed_now();

        let token = signer.issue_refresh(&SubjectId::new("u-1"), now).unwrap();
        let claims = verifier.verify(&token).unwrap();

        assert_eq!(claims.expires_at, now.timestamp() + 1_036_800);
    }

    #[test]
    fn round_trip_preserves_subject_and_class() {
        let signer = TokenSigner::new(SECRET).unwrap();
        let verifier = HmacVerifier::new(SECRET).unwrap();

        let access = signer
            .issue_access(&SubjectId::new("u-42"), fixed_now())
            .unwrap();
        let claims = verifier.verify(&access).unwrap();
        assert_eq!(claims.subject.as_str(), "u-42");
        assert_eq!(claims.class, TokenClass::Access);

        let refresh = signer
            .issue_refresh(&SubjectId::new("u-42"), fixed_now())
            .unwrap();
        let claims = verifier.verify(&refresh).unwrap();
        assert_eq!(claims.subject.as_str(), "u-42");
        assert_eq!(claims.class, TokenClass::Refresh);
    }

    #[test]
    fn wrong_secret_is_invalid_signature() {
        let signer = TokenSigner::new(SECRET).unwrap();
        let verifier = HmacVerifier::new("a-different-secret").unwrap();

        let token = signer.issue_access(&SubjectId::new("u-1"), fixed_now()).unwrap();
        let err = verifier.verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidSignature));
    }

    #[test]
    fn garbage_token_is_invalid() {
        let verifier = HmacVerifier::new(SECRET).unwrap();
        let err = verifier.verify("not-a-jwt").unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn expired_token_still_decodes() {
        // Expiry is the caller's concern; the verifier only checks the
        // signature and structure.
        let signer = TokenSigner::new(SECRET).unwrap();
        let verifier = HmacVerifier::new(SECRET).unwrap();

        let long_ago = Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap();
        let token = signer.issue_access(&SubjectId::new("u-1"), long_ago).unwrap();

        let claims = verifier.verify(&token).unwrap();
        assert_eq!(claims.subject.as_str(), "u-1");
    }

    #[test]
    fn empty_secret_rejected() {
        assert!(matches!(TokenSigner::new(""), Err(AuthError::EmptySecret)));
        assert!(matches!(HmacVerifier::new(""), Err(AuthError::EmptySecret)));
    }

    #[test]
    fn empty_subject_rejected() {
        let signer = TokenSigner::new(SECRET).unwrap();
        let err = signer
            .issue_access(&SubjectId::new(""), fixed_now())
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingSubject));
    }

    #[test]
    fn access_class_is_absent_on_the_wire() {
        let claims = TokenClaims {
            subject: SubjectId::new("u-1"),
            expires_at: 1_700_000_000,
            class: TokenClass::Access,
        };
        let value = serde_json::to_value(&claims).unwrap();
        assert!(value.get("type").is_none());

        // And an absent marker decodes back to access.
        let decoded: TokenClaims =
            serde_json::from_value(serde_json::json!({"sub": "u-1", "exp": 1_700_000_000}))
                .unwrap();
        assert_eq!(decoded.class, TokenClass::Access);
    }

    #[test]
    fn refresh_class_is_tagged_on_the_wire() {
        let claims = TokenClaims {
            subject: SubjectId::new("u-1"),
            expires_at: 1_700_000_000,
            class: TokenClass::Refresh,
        };
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["type"], "refresh");
    }

    #[test]
    fn mock_verifier_works() {
        let verifier = MockVerifier;
        let claims = verifier.verify("test-token:u-9").unwrap();
        assert_eq!(claims.subject.as_str(), "u-9");
        assert_eq!(claims.class, TokenClass::Access);

        assert!(verifier.verify("something-else").is_err());
        assert!(verifier.verify("test-token:").is_err());
    }
}
