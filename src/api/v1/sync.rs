//! BoardGameGeek collection sync (stub)

use axum::response::Response;

use crate::api::routing::RequestContext;
use crate::api::types::ApiError;

/// POST /v1/sync/bgg
pub async fn bgg(_ctx: RequestContext) -> Result<Response, ApiError> {
    Err(ApiError::not_implemented(
        "NOT_IMPLEMENTED",
        "BoardGameGeek collection sync is not available yet",
    ))
}
