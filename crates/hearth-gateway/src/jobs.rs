//! Proxy job factory.
//!
//! A proxy job is a request handler whose entire behavior is forwarding
//! the inbound request to one configured downstream service and relaying
//! its response. Jobs are stateless and make exactly one outbound call
//! per inbound request; the gateway never retries, deduplicates or
//! caches, so idempotency is entirely a property of the downstream.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::routing::{get, post, MethodRouter};

use hearth_auth::TokenVerifier;

use crate::auth::AuthUser;
use crate::config::Downstream;
use crate::proxy::{inject_caller_id, PathTemplate};
use crate::state::GatewayState;

/// Build an authenticated GET job.
///
/// At request time the job substitutes the route's path parameters into
/// `template`, copies the inbound query string onto the downstream URL
/// verbatim, issues a bodyless GET and relays the response.
pub fn read_job<V>(target: Downstream, template: &str) -> MethodRouter<Arc<GatewayState<V>>>
where
    V: TokenVerifier + 'static,
{
    let template = PathTemplate::parse(template);

    get(
        move |State(state): State<Arc<GatewayState<V>>>,
              _user: AuthUser,
              Path(params): Path<HashMap<String, String>>,
              RawQuery(query): RawQuery| async move {
            let path = template.resolve(&params)?;
            let path_and_query = match query {
                Some(q) => format!("{path}?{q}"),
                None => path,
            };
            state.proxy.get(target, &path_and_query).await
        },
    )
}

/// Build an authenticated POST job.
///
/// The inbound body must be a JSON object; the job shallow-merges in a
/// `callerId` field carrying the authenticated subject identifier (the
/// gateway's identity injection always wins over a client-supplied
/// field), forwards it as `application/json` and relays the response.
pub fn write_job<V>(target: Downstream, path: &str) -> MethodRouter<Arc<GatewayState<V>>>
where
    V: TokenVerifier + 'static,
{
    let path = path.to_string();

    post(
        move |State(state): State<Arc<GatewayState<V>>>, user: AuthUser, body: Bytes| async move {
            let body = inject_caller_id(&body, &user.subject_id)?;
            state.proxy.post_json(target, &path, body).await
        },
    )
}

/// Build an unauthenticated POST job that forwards the body untouched.
///
/// Used for token renewal, where the caller by definition does not yet
/// hold a valid access token and there is no identity to inject.
pub fn public_write_job<V>(target: Downstream, path: &str) -> MethodRouter<Arc<GatewayState<V>>>
where
    V: TokenVerifier + 'static,
{
    let path = path.to_string();

    post(
        move |State(state): State<Arc<GatewayState<V>>>, body: Bytes| async move {
            state.proxy.post_json(target, &path, body.to_vec()).await
        },
    )
}
