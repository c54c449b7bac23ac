//! Request/response logging with API-key redaction.
//! No tracing span is created here; `TraceLayer` already owns span
//! creation, and duplicate spans panic in the tracing registry.

use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use tracing::{debug, info};

pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = extract_request_id(&request);

    debug!(
        method = %method,
        path = %path,
        request_id = %request_id,
        headers = %redact_headers(&request),
        "Incoming request"
    );

    let response = next.run(request).await;

    info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = %request_id,
        "Request completed"
    );

    response
}

fn extract_request_id(request: &Request<Body>) -> String {
    request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// Render request headers for the debug line, hiding key material.
fn redact_headers(request: &Request<Body>) -> String {
    let mut parts = Vec::new();

    for (name, value) in request.headers() {
        let name = name.as_str().to_lowercase();
        if !should_log_header(&name) {
            continue;
        }

        let value = if is_sensitive_header(&name) {
            "[REDACTED]"
        } else {
            value.to_str().unwrap_or("[invalid]")
        };
        parts.push(format!("{}={}", name, value));
    }

    parts.join(", ")
}

fn is_sensitive_header(name: &str) -> bool {
    matches!(name, "authorization" | "x-api-key" | "cookie")
}

fn should_log_header(name: &str) -> bool {
    matches!(
        name,
        "authorization"
            | "x-api-key"
            | "content-type"
            | "content-length"
            | "user-agent"
            | "x-request-id"
            | "origin"
    )
}
