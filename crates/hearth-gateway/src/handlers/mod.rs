//! HTTP request handlers served locally by the gateway.
//!
//! Everything else on the API surface is a proxy job; see [`crate::jobs`].

pub mod health;
pub mod identity;
