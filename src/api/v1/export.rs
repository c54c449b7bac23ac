//! Full data export

use axum::response::Response;
use chrono::Utc;
use serde_json::json;
use tracing::debug;

use crate::api::envelope;
use crate::api::routing::RequestContext;
use crate::api::types::ApiError;

/// GET /v1/export
pub async fn export(ctx: RequestContext) -> Result<Response, ApiError> {
    debug!(key = ?ctx.decision.key_id, "Exporting collection");

    let games = ctx
        .state
        .datastore
        .query(
            "SELECT id, bgg_id, name, min_players, max_players, playtime_minutes, created_at \
             FROM games ORDER BY id",
            &[],
        )
        .await
        .map_err(|err| ApiError::from_domain("exporting games", err))?;

    let plays = ctx
        .state
        .datastore
        .query(
            "SELECT id, game_id, played_at, location, notes, players, created_at \
             FROM plays ORDER BY id",
            &[],
        )
        .await
        .map_err(|err| ApiError::from_domain("exporting plays", err))?;

    Ok(envelope::respond(json!({
        "exported_at": Utc::now().to_rfc3339(),
        "games": games,
        "plays": plays,
    })))
}
