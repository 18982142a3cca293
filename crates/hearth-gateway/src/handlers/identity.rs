//! Caller identity endpoint.

use axum::Json;
use serde::Serialize;

use crate::auth::AuthUser;

/// Response carrying the caller's resolved identity.
#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    /// The subject identifier bound by the authentication middleware.
    #[serde(rename = "subjectId")]
    pub subject_id: String,
}

/// Return the identity the middleware resolved for this request.
///
/// # Example
///
/// ```text
/// GET /api/auth/me
/// Authorization: Bearer <accessToken>
///
/// Response: 200 OK
/// {
///   "subjectId": "u-1"
/// }
/// ```
pub async fn me(user: AuthUser) -> Json<IdentityResponse> {
    Json(IdentityResponse {
        subject_id: user.subject_id.to_string(),
    })
}
