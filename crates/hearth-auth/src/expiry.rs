//! Pure expiry check, separate from any cryptographic step.

use chrono::{DateTime, Utc};

use crate::token::TokenClaims;

/// Whether `claims` is expired at time `now`.
///
/// A token is expired when its expiry lies strictly before `now`; a
/// token expiring exactly at `now` is still valid.
#[must_use]
pub fn is_expired(claims: &TokenClaims, now: DateTime<Utc>) -> bool {
    claims.expires_at < now.timestamp()
}
