//! Ordered route table and dispatch

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use axum::http::Method;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures::future::BoxFuture;
use tracing::{debug, error};

use super::pattern::RoutePattern;
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::AuthorizationDecision;

/// Everything a handler capability receives for one request.
#[derive(Clone)]
pub struct RequestContext {
    pub state: AppState,
    /// Named segment values extracted from the matched pattern.
    pub params: HashMap<String, String>,
    /// Decoded query-string pairs.
    pub query: HashMap<String, String>,
    pub decision: AuthorizationDecision,
    pub body: Bytes,
}

/// Boxed async handler capability bound to a route.
pub type Handler =
    Arc<dyn Fn(RequestContext) -> BoxFuture<'static, Result<Response, ApiError>> + Send + Sync>;

/// Adapt a plain async fn into a [`Handler`].
pub fn handler<F, Fut>(f: F) -> Handler
where
    F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, ApiError>> + Send + 'static,
{
    Arc::new(move |ctx| Box::pin(f(ctx)))
}

struct Route {
    method: Method,
    pattern: RoutePattern,
    handler: Handler,
}

/// Immutable ordered route table; the first matching entry wins. Built once
/// at startup and shared across requests.
#[derive(Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, method: Method, pattern: &str, handler: Handler) -> Self {
        self.routes.push(Route {
            method,
            pattern: RoutePattern::parse(pattern),
            handler,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Dispatch to the first route whose method and pattern both match.
    /// Handler failures come back shaped; nothing escapes unenveloped.
    pub async fn dispatch(&self, method: &Method, path: &str, mut ctx: RequestContext) -> Response {
        let Some(route) = self
            .routes
            .iter()
            .find(|route| route.method == *method && route.pattern.matches(path))
        else {
            return ApiError::not_found("NOT_FOUND", format!("{} {} not found", method, path))
                .into_response();
        };

        debug!(
            method = %method,
            path = %path,
            pattern = %route.pattern.as_str(),
            "Dispatching request"
        );

        ctx.params = route.pattern.extract_params(path);

        match (route.handler)(ctx).await {
            Ok(response) => response,
            Err(err) => {
                if err.status.is_server_error() {
                    error!(
                        method = %method,
                        path = %path,
                        code = %err.code,
                        message = %err.message,
                        "Handler failure"
                    );
                }
                err.into_response()
            }
        }
    }
}
