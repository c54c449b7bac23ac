//! Service info endpoint, the only keyless route

use axum::response::Response;
use serde_json::json;

use super::envelope;
use super::routing::RequestContext;
use super::types::ApiError;

/// GET /
pub async fn api_info(_ctx: RequestContext) -> Result<Response, ApiError> {
    Ok(envelope::respond(json!({
        "name": "boardlog",
        "version": env!("CARGO_PKG_VERSION"),
        "api": "/v1",
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::middleware::Authenticator;
    use crate::api::routing::RouteTable;
    use crate::api::state::AppState;
    use crate::domain::auth::{AuthorizationDecision, KeyRing};
    use crate::domain::datastore::MockDatastore;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_api_info() {
        let ctx = RequestContext {
            state: AppState::new(
                Arc::new(MockDatastore::new()),
                Arc::new(Authenticator::new(KeyRing::parse(""), false)),
                Arc::new(RouteTable::new()),
            ),
            params: HashMap::new(),
            query: HashMap::new(),
            decision: AuthorizationDecision::public(),
            body: bytes::Bytes::new(),
        };

        let response = api_info(ctx).await.unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["name"], "boardlog");
        assert_eq!(body["data"]["version"], env!("CARGO_PKG_VERSION"));
    }
}
