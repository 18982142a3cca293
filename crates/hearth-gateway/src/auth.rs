//! Authentication middleware and extractors.
//!
//! This module provides the `AuthUser` extractor that gates every
//! authenticated route. Per request it walks a fixed decision tree:
//! no bearer credential, bad signature/structure, wrong token class,
//! expired — each a terminal 401 — and otherwise admits the request
//! with the caller's subject identifier bound for the handler.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::Utc;

use hearth_auth::{expiry, SubjectId, TokenClaims, TokenClass, TokenVerifier};

use crate::error::ApiError;
use crate::state::GatewayState;

/// An authenticated caller extracted from a bearer access token.
///
/// The identity lives only for the duration of the request; it is never
/// persisted or shared across requests.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The subject identifier of the authenticated principal.
    pub subject_id: SubjectId,
}

impl AuthUser {
    /// Admit a caller from verified, unexpired claims.
    ///
    /// Refresh tokens are rejected here: they are issued with a distinct
    /// class marker precisely so they cannot stand in for access tokens.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidToken` for a non-access token class and
    /// `ApiError::ExpiredToken` for claims past their expiry.
    pub fn from_claims(claims: TokenClaims, now: chrono::DateTime<Utc>) -> Result<Self, ApiError> {
        if claims.class != TokenClass::Access {
            return Err(ApiError::InvalidToken);
        }

        if expiry::is_expired(&claims, now) {
            return Err(ApiError::ExpiredToken);
        }

        Ok(Self {
            subject_id: claims.subject,
        })
    }
}

impl<V> FromRequestParts<Arc<GatewayState<V>>> for AuthUser
where
    V: TokenVerifier + 'static,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<GatewayState<V>>,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Self, Self::Rejection>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            // Extract the Authorization header
            let auth_header = parts
                .headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or(ApiError::MissingToken)?;

            // Extract the Bearer token
            let token = auth_header
                .strip_prefix("Bearer ")
                .ok_or(ApiError::MissingToken)?;

            // Verify the signature and decode the payload
            let claims = state.verifier.verify(token)?;

            // Gate on class and expiry, then admit
            AuthUser::from_claims(claims, Utc::now())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use hearth_auth::ACCESS_TOKEN_TTL_SECS;

    fn claims(expires_at: i64, class: TokenClass) -> TokenClaims {
        TokenClaims {
            subject: SubjectId::new("u-1"),
            expires_at,
            class,
        }
    }

    #[test]
    fn valid_claims_are_admitted() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let user = AuthUser::from_claims(
            claims(now.timestamp() + ACCESS_TOKEN_TTL_SECS, TokenClass::Access),
            now,
        )
        .unwrap();
        assert_eq!(user.subject_id.as_str(), "u-1");
    }

    #[test]
    fn expired_claims_are_rejected() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let err =
            AuthUser::from_claims(claims(now.timestamp() - 1, TokenClass::Access), now).unwrap_err();
        assert!(matches!(err, ApiError::ExpiredToken));
    }

    #[test]
    fn refresh_tokens_are_not_admitted() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let err = AuthUser::from_claims(
            claims(now.timestamp() + 1_000_000, TokenClass::Refresh),
            now,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken));
    }

    #[test]
    fn expiry_boundary_admits_exactly_now() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let user =
            AuthUser::from_claims(claims(now.timestamp(), TokenClass::Access), now).unwrap();
        assert_eq!(user.subject_id.as_str(), "u-1");
    }

    #[tokio::test]
    async fn extractor_works_against_any_verifier_impl() {
        use axum::http::{HeaderName, HeaderValue};
        use hearth_auth::MockVerifier;

        use crate::config::{DownstreamConfig, GatewayConfig};
        use crate::routes::create_router;

        let state = GatewayState::new(
            Arc::new(MockVerifier),
            DownstreamConfig::single_base("http://unused.invalid"),
            GatewayConfig::default(),
        )
        .unwrap();
        let server = axum_test::TestServer::new(create_router(state)).unwrap();

        let response = server
            .get("/api/auth/me")
            .add_header(
                HeaderName::from_static("authorization"),
                HeaderValue::from_static("Bearer test-token:u-5"),
            )
            .await;

        assert_eq!(response.status_code(), 200);
    }
}
