//! Request pipeline: preflight -> authentication -> routing
//!
//! Every request flows through a single fallback handler so the declarative
//! route table — not the framework router — owns matching, 404 shaping, and
//! first-match-wins semantics.

use std::collections::HashMap;

use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::{Method, Request};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::trace::TraceLayer;

use super::envelope;
use super::middleware::logging::logging_middleware;
use super::routing::RequestContext;
use super::state::AppState;
use super::types::ApiError;

/// Maximum request body size (1 MB)
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Build the axum application around the pipeline.
pub fn app(state: AppState) -> Router {
    Router::new()
        .fallback(handle)
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Entry point for every request.
pub async fn handle(State(state): State<AppState>, request: Request<Body>) -> Response {
    // Preflight never reaches authentication or routing.
    if request.method() == Method::OPTIONS {
        return envelope::preflight();
    }

    let (parts, body) = request.into_parts();
    let path = parts.uri.path().to_string();

    let decision = match state
        .authenticator
        .authorize(&parts.method, &path, &parts.headers)
    {
        Ok(decision) => decision,
        Err(err) => return err.into_response(),
    };

    let body = match to_bytes(body, MAX_BODY_SIZE).await {
        Ok(bytes) => bytes,
        Err(_) => {
            return ApiError::bad_request("INVALID_BODY", "Failed to read request body")
                .into_response();
        }
    };

    let query = parse_query(parts.uri.query());
    let routes = state.routes.clone();
    let ctx = RequestContext {
        state,
        params: HashMap::new(),
        query,
        decision,
        body,
    };

    routes.dispatch(&parts.method, &path, ctx).await
}

/// Split `a=b&c=d` query strings; keys without a value map to "". No
/// decoding beyond what the transport already performed.
fn parse_query(raw: Option<&str>) -> HashMap<String, String> {
    let Some(raw) = raw else {
        return HashMap::new();
    };

    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::middleware::Authenticator;
    use crate::api::v1;
    use crate::domain::auth::KeyRing;
    use crate::domain::datastore::MockDatastore;
    use axum::http::{header, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    const KEYS: &str = "admin-secret-1234:admin,user-secret-5678:user,ro-secret-9012:read-only";

    fn test_app(datastore: MockDatastore, require_auth: bool) -> Router {
        let state = AppState::new(
            Arc::new(datastore),
            Arc::new(Authenticator::new(KeyRing::parse(KEYS), require_auth)),
            Arc::new(v1::routes()),
        );
        app(state)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn get_with_key(uri: &str, key: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .header("x-api-key", key)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        }
    }

    fn count_row(total: i64) -> Vec<crate::domain::JsonRow> {
        let mut row = serde_json::Map::new();
        row.insert("total".to_string(), json!(total));
        vec![row]
    }

    #[tokio::test]
    async fn test_preflight_bypasses_authentication() {
        let app = test_app(MockDatastore::new(), true);
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/v1/games")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_MAX_AGE)
                .unwrap(),
            "86400"
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_root_is_public() {
        let app = test_app(MockDatastore::new(), true);
        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["data"]["name"], "boardlog");
    }

    #[tokio::test]
    async fn test_missing_key_is_401() {
        let app = test_app(MockDatastore::new(), true);
        let response = app.oneshot(get("/v1/games")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "MISSING_API_KEY");
    }

    #[tokio::test]
    async fn test_unrecognized_key_is_401() {
        let app = test_app(MockDatastore::new(), true);
        let response = app
            .oneshot(get_with_key("/v1/games", "nope"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_API_KEY");
    }

    #[tokio::test]
    async fn test_user_key_cannot_export() {
        let app = test_app(MockDatastore::new(), true);
        let response = app
            .oneshot(get_with_key("/v1/export", "user-secret-5678"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INSUFFICIENT_PERMISSIONS");
        assert!(
            body["error"]["message"]
                .as_str()
                .unwrap()
                .contains("export")
        );
    }

    #[tokio::test]
    async fn test_admin_key_can_export() {
        let mut datastore = MockDatastore::new();
        datastore
            .expect_query()
            .times(2)
            .returning(|_, _| Ok(vec![]));

        let app = test_app(datastore, true);
        let response = app
            .oneshot(get_with_key("/v1/export", "admin-secret-1234"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert!(body["data"]["exported_at"].is_string());
        assert!(body["data"]["games"].is_array());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404_after_auth() {
        let app = test_app(MockDatastore::new(), true);
        let response = app
            .oneshot(get_with_key("/v1/unknown", "admin-secret-1234"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "GET /v1/unknown not found");
    }

    #[tokio::test]
    async fn test_disabled_auth_serves_without_key() {
        let mut datastore = MockDatastore::new();
        datastore.expect_query().times(2).returning(|sql, _| {
            if sql.contains("COUNT(*)") {
                Ok(count_row(0))
            } else {
                Ok(vec![])
            }
        });

        let app = test_app(datastore, false);
        let response = app.oneshot(get("/v1/games")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["meta"]["limit"], 50);
        assert_eq!(body["meta"]["offset"], 0);
        assert_eq!(body["meta"]["total"], 0);
    }

    #[tokio::test]
    async fn test_pagination_params_flow_through() {
        let mut datastore = MockDatastore::new();
        datastore.expect_query().times(2).returning(|sql, params| {
            if sql.contains("COUNT(*)") {
                Ok(count_row(7))
            } else {
                assert_eq!(params[0], crate::domain::SqlValue::int(5));
                assert_eq!(params[1], crate::domain::SqlValue::int(10));
                Ok(vec![])
            }
        });

        let app = test_app(datastore, false);
        let response = app
            .oneshot(get("/v1/games?limit=5&offset=10"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["meta"]["total"], 7);
        assert_eq!(body["meta"]["limit"], 5);
        assert_eq!(body["meta"]["offset"], 10);
    }

    #[tokio::test]
    async fn test_storage_failure_is_shaped_500() {
        let mut datastore = MockDatastore::new();
        datastore.expect_query().returning(|_, _| {
            Err(crate::domain::DomainError::storage(
                "connection to 10.0.0.3 refused",
            ))
        });

        let app = test_app(datastore, false);
        let response = app.oneshot(get("/v1/games")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert!(
            !body["error"]["message"]
                .as_str()
                .unwrap()
                .contains("10.0.0.3")
        );
    }

    #[tokio::test]
    async fn test_error_responses_carry_cors_headers() {
        let app = test_app(MockDatastore::new(), true);
        let response = app.oneshot(get("/v1/games")).await.unwrap();
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }

    #[test]
    fn test_parse_query() {
        let query = parse_query(Some("limit=5&offset=10&flag"));
        assert_eq!(query["limit"], "5");
        assert_eq!(query["offset"], "10");
        assert_eq!(query["flag"], "");
        assert!(parse_query(None).is_empty());
    }
}
