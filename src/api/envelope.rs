//! Uniform JSON response envelope
//!
//! Every response this service produces goes through here: success bodies
//! are `{"data": ...}`, failures are `{"error": {...}}`, never both. All
//! responses carry the permissive CORS headers and an `application/json`
//! content type.

use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{json, Value};

const ALLOWED_METHODS: &str = "GET,POST,PUT,PATCH,DELETE,OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, Authorization, X-API-Key";
/// Preflight cache lifetime: 24 hours.
const PREFLIGHT_MAX_AGE: &str = "86400";

/// 200 success envelope.
pub fn respond<T: Serialize>(data: T) -> Response {
    respond_with_status(data, StatusCode::OK)
}

/// Success envelope with an explicit status.
pub fn respond_with_status<T: Serialize>(data: T, status: StatusCode) -> Response {
    json_response(status, &json!({ "data": data }))
}

/// Success envelope with pagination metadata. The caller owns the
/// `items.len() <= limit` and `total >= items.len()` invariants; nothing is
/// validated here.
pub fn respond_paginated<T: Serialize>(items: T, total: i64, limit: i64, offset: i64) -> Response {
    let body = json!({
        "data": items,
        "meta": { "total": total, "limit": limit, "offset": offset },
    });
    json_response(StatusCode::OK, &body)
}

/// Error envelope. `code` is a stable machine-readable token, distinct from
/// the HTTP status, so clients can branch on semantics.
pub fn respond_error(
    code: &str,
    message: &str,
    status: StatusCode,
    details: Option<Value>,
) -> Response {
    let mut error = json!({ "code": code, "message": message });
    if let Some(details) = details {
        error["details"] = details;
    }
    json_response(status, &json!({ "error": error }))
}

/// CORS preflight response: 200, CORS headers plus a cache lifetime, empty
/// body.
pub fn preflight() -> Response {
    let mut response = StatusCode::OK.into_response();
    apply_cors(response.headers_mut());
    response.headers_mut().insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static(PREFLIGHT_MAX_AGE),
    );
    response
}

fn json_response(status: StatusCode, body: &Value) -> Response {
    let mut response = (status, body.to_string()).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    apply_cors(headers);
    response
}

fn apply_cors(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
}
