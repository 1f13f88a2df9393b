//! Inbound Authentication
//!
//! HTTP basic auth in front of every route, or anonymous access when no
//! credentials are configured.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::config::AuthMode;

/// Middleware rejecting requests that do not satisfy the configured [`AuthMode`]
pub async fn require_auth(State(state): State<Arc<AppState>>, req: Request, next: Next) -> Response {
    if is_authorized(&state.auth, req.headers()) {
        next.run(req).await
    } else {
        ApiError::Unauthorized.into_response()
    }
}

/// Check request headers against the auth mode
pub fn is_authorized(mode: &AuthMode, headers: &HeaderMap) -> bool {
    match mode {
        AuthMode::Anonymous => true,
        AuthMode::BasicCredentials { user, pass } => match basic_credentials(headers) {
            Some((given_user, given_pass)) => given_user == *user && given_pass == *pass,
            None => false,
        },
    }
}

/// Decode `Authorization: Basic <base64(user:pass)>`
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}
