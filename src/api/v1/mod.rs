//! Versioned API surface: route registration and endpoint handlers

pub mod export;
pub mod games;
pub mod players;
pub mod plays;
pub mod query;
pub mod stats;
pub mod sync;

use axum::http::Method;

use crate::api::info;
use crate::api::routing::{handler, RequestContext, RouteTable};
use crate::api::types::ApiError;
use crate::domain::SqlValue;

/// The declarative route table. Order matters: dispatch picks the first
/// matching entry. `required_permission` must stay consistent with this
/// table by convention.
pub fn routes() -> RouteTable {
    RouteTable::new()
        .route(Method::GET, "/", handler(info::api_info))
        .route(Method::GET, "/v1/games", handler(games::list))
        .route(Method::GET, "/v1/games/{id}", handler(games::get))
        .route(Method::POST, "/v1/games", handler(games::create))
        .route(Method::PUT, "/v1/games/{id}", handler(games::update))
        .route(Method::DELETE, "/v1/games/{id}", handler(games::delete))
        .route(Method::GET, "/v1/plays", handler(plays::list))
        .route(Method::GET, "/v1/plays/{id}", handler(plays::get))
        .route(Method::POST, "/v1/plays", handler(plays::create))
        .route(Method::DELETE, "/v1/plays/{id}", handler(plays::delete))
        .route(Method::GET, "/v1/players", handler(players::list))
        .route(Method::GET, "/v1/players/{name}", handler(players::stats))
        .route(Method::GET, "/v1/stats", handler(stats::summary))
        .route(Method::GET, "/v1/export", handler(export::export))
        .route(Method::POST, "/v1/query", handler(query::run))
        .route(Method::POST, "/v1/sync/bgg", handler(sync::bgg))
}

/// Run a `SELECT COUNT(*) AS total ...` statement.
pub(crate) async fn count_rows(
    ctx: &RequestContext,
    sql: &str,
    params: &[SqlValue],
) -> Result<i64, ApiError> {
    let rows = ctx
        .state
        .datastore
        .query(sql, params)
        .await
        .map_err(|err| ApiError::from_domain("counting rows", err))?;

    Ok(rows
        .first()
        .and_then(|row| row.get("total"))
        .and_then(|value| value.as_i64())
        .unwrap_or(0))
}

/// Decode the `{id}` path parameter as a positive integer.
pub(crate) fn parse_id(ctx: &RequestContext, code: &'static str) -> Result<i64, ApiError> {
    let raw = ctx.params.get("id").map(String::as_str).unwrap_or("");
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::bad_request(code, format!("'{}' is not a valid id", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_table_covers_the_full_surface() {
        assert_eq!(routes().len(), 16);
    }
}
