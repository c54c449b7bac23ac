//! API key authentication and authorization
//!
//! Decides per request whether the pipeline may proceed: exempt public
//! routes pass through unauthenticated, disabled-auth mode grants
//! everything, and otherwise the presented key must exist in the ring and
//! carry the permission the (method, path) pair requires.
//!
//! The key is extracted from either:
//! - Authorization header: `Bearer <secret>`
//! - X-API-Key header: `<secret>`

use axum::http::{header, HeaderMap, Method};
use tracing::debug;

use crate::api::types::ApiError;
use crate::domain::auth::{required_permission, AuthorizationDecision, KeyRing};

/// Dedicated API key header, checked after the bearer token.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Process-wide authorizer over the injected key ring.
pub struct Authenticator {
    keys: KeyRing,
    require_auth: bool,
}

impl Authenticator {
    pub fn new(keys: KeyRing, require_auth: bool) -> Self {
        Self { keys, require_auth }
    }

    /// Run the per-request authorization sequence. A terminal error here
    /// aborts the pipeline before any route is considered.
    pub fn authorize(
        &self,
        method: &Method,
        path: &str,
        headers: &HeaderMap,
    ) -> Result<AuthorizationDecision, ApiError> {
        if is_public_route(method, path) {
            return Ok(AuthorizationDecision::public());
        }

        // Local-iteration convenience; must be enabled in any deployment
        // intended to be access-controlled.
        if !self.require_auth {
            return Ok(AuthorizationDecision::dev_mode());
        }

        let secret = extract_api_key(headers).ok_or_else(|| {
            ApiError::unauthorized(
                "MISSING_API_KEY",
                "API key required. Provide via 'Authorization: Bearer <key>' or 'X-API-Key: <key>' header",
            )
        })?;

        let entry = self
            .keys
            .lookup(&secret)
            .ok_or_else(|| ApiError::unauthorized("INVALID_API_KEY", "Invalid API key"))?;

        let required = required_permission(method, path);
        let permissions = entry.permissions();
        if !permissions.contains(required) {
            return Err(ApiError::forbidden(
                "INSUFFICIENT_PERMISSIONS",
                format!("Missing required permission: {}", required),
            ));
        }

        let key_id = redact_key(&secret);
        debug!(key = %key_id, permission = %required, "Request authorized");

        Ok(AuthorizationDecision::authorized(permissions, key_id))
    }
}

/// Routes reachable without a key: the service root, and preflight on any
/// path (normally intercepted before authentication runs).
fn is_public_route(method: &Method, path: &str) -> bool {
    (method == Method::GET && path == "/") || method == Method::OPTIONS
}

/// Bearer token first, then the dedicated header.
fn extract_api_key(headers: &HeaderMap) -> Option<String> {
    if let Some(auth) = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    {
        if let Some(token) = auth.strip_prefix("Bearer ") {
            return Some(token.trim().to_string());
        }
    }

    headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
}

/// First 8 characters of the secret plus an ellipsis; never the full value.
fn redact_key(secret: &str) -> String {
    let prefix: String = secret.chars().take(8).collect();
    format!("{}…", prefix)
}
