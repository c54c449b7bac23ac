//! Raw read-only query passthrough

use axum::response::Response;
use serde_json::json;
use tracing::debug;

use crate::api::envelope;
use crate::api::routing::RequestContext;
use crate::api::types::{parse_json_body, ApiError, QueryRequest};
use crate::domain::DomainError;

/// POST /v1/query
pub async fn run(ctx: RequestContext) -> Result<Response, ApiError> {
    let request: QueryRequest = parse_json_body(&ctx.body)?;
    request
        .validate()
        .map_err(|message| ApiError::bad_request("INVALID_QUERY", message))?;

    debug!(key = ?ctx.decision.key_id, "Running raw query");

    let rows = ctx
        .state
        .datastore
        .query(request.statement(), &[])
        .await
        .map_err(|err| match err {
            // The statement is caller-supplied; its own failure is the
            // caller's 400, not our 500.
            DomainError::Storage { message } => {
                ApiError::bad_request("QUERY_FAILED", "Query execution failed")
                    .with_details(json!({ "reason": message }))
            }
            other => ApiError::from_domain("running query", other),
        })?;

    let row_count = rows.len();
    Ok(envelope::respond(json!({
        "rows": rows,
        "row_count": row_count,
    })))
}
