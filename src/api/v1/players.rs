//! Player statistics endpoints, derived from the `players` JSON column

use axum::response::Response;
use serde_json::json;
use tracing::debug;

use crate::api::envelope;
use crate::api::routing::RequestContext;
use crate::api::types::{ApiError, PageParams};
use crate::domain::SqlValue;

/// GET /v1/players
pub async fn list(ctx: RequestContext) -> Result<Response, ApiError> {
    let page = PageParams::from_query(&ctx.query);
    debug!(limit = page.limit, offset = page.offset, "Listing players");

    let total = super::count_rows(
        &ctx,
        "SELECT COUNT(DISTINCT entry.value->>'name') AS total \
         FROM plays, jsonb_array_elements(players) AS entry",
        &[],
    )
    .await?;

    let rows = ctx
        .state
        .datastore
        .query(
            "SELECT entry.value->>'name' AS name, \
                    COUNT(*) AS plays, \
                    COUNT(*) FILTER (WHERE (entry.value->>'win')::boolean) AS wins \
             FROM plays, jsonb_array_elements(players) AS entry \
             GROUP BY 1 ORDER BY plays DESC, name LIMIT $1 OFFSET $2",
            &[SqlValue::int(page.limit), SqlValue::int(page.offset)],
        )
        .await
        .map_err(|err| ApiError::from_domain("listing players", err))?;

    Ok(envelope::respond_paginated(rows, total, page.limit, page.offset))
}

/// GET /v1/players/{name}
///
/// Overall record plus a per-game breakdown. The name is matched verbatim
/// against the recorded player entries.
pub async fn stats(ctx: RequestContext) -> Result<Response, ApiError> {
    let name = ctx.params.get("name").cloned().unwrap_or_default();

    let overall = ctx
        .state
        .datastore
        .query(
            "SELECT COUNT(*) AS plays, \
                    COUNT(*) FILTER (WHERE (entry.value->>'win')::boolean) AS wins, \
                    AVG((entry.value->>'score')::double precision) AS avg_score \
             FROM plays, jsonb_array_elements(players) AS entry \
             WHERE entry.value->>'name' = $1",
            &[SqlValue::text(name.clone())],
        )
        .await
        .map_err(|err| ApiError::from_domain("fetching player stats", err))?;

    let overall = overall
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::internal("fetching player stats"))?;

    let plays = overall
        .get("plays")
        .and_then(|value| value.as_i64())
        .unwrap_or(0);
    if plays == 0 {
        return Err(ApiError::not_found(
            "PLAYER_NOT_FOUND",
            format!("No recorded plays for player '{}'", name),
        ));
    }

    let per_game = ctx
        .state
        .datastore
        .query(
            "SELECT g.name AS game, \
                    COUNT(*) AS plays, \
                    COUNT(*) FILTER (WHERE (entry.value->>'win')::boolean) AS wins \
             FROM plays p \
             JOIN games g ON g.id = p.game_id \
             CROSS JOIN LATERAL jsonb_array_elements(p.players) AS entry \
             WHERE entry.value->>'name' = $1 \
             GROUP BY g.name ORDER BY plays DESC, game",
            &[SqlValue::text(name.clone())],
        )
        .await
        .map_err(|err| ApiError::from_domain("fetching player stats", err))?;

    Ok(envelope::respond(json!({
        "name": name,
        "plays": plays,
        "wins": overall.get("wins"),
        "avg_score": overall.get("avg_score"),
        "games": per_game,
    })))
}
