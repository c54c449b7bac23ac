//! Play endpoints: SQL glue over the datastore

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::json;
use tracing::debug;

use crate::api::envelope;
use crate::api::routing::RequestContext;
use crate::api::types::{parse_json_body, ApiError, CreatePlayRequest, PageParams};
use crate::domain::SqlValue;

const PLAY_COLUMNS: &str = "p.id, p.game_id, g.name AS game_name, p.played_at, p.location, \
                            p.notes, p.players, p.created_at";

/// GET /v1/plays
///
/// Optional `game_id` query parameter narrows the list to one game.
pub async fn list(ctx: RequestContext) -> Result<Response, ApiError> {
    let page = PageParams::from_query(&ctx.query);
    let game_filter = ctx
        .query
        .get("game_id")
        .and_then(|value| value.parse::<i64>().ok());

    debug!(
        limit = page.limit,
        offset = page.offset,
        game_id = ?game_filter,
        "Listing plays"
    );

    let (total, rows) = match game_filter {
        Some(game_id) => {
            let total = super::count_rows(
                &ctx,
                "SELECT COUNT(*) AS total FROM plays WHERE game_id = $1",
                &[SqlValue::int(game_id)],
            )
            .await?;
            let rows = ctx
                .state
                .datastore
                .query(
                    &format!(
                        "SELECT {PLAY_COLUMNS} FROM plays p JOIN games g ON g.id = p.game_id \
                         WHERE p.game_id = $1 ORDER BY p.played_at DESC, p.id DESC \
                         LIMIT $2 OFFSET $3"
                    ),
                    &[
                        SqlValue::int(game_id),
                        SqlValue::int(page.limit),
                        SqlValue::int(page.offset),
                    ],
                )
                .await
                .map_err(|err| ApiError::from_domain("listing plays", err))?;
            (total, rows)
        }
        None => {
            let total =
                super::count_rows(&ctx, "SELECT COUNT(*) AS total FROM plays", &[]).await?;
            let rows = ctx
                .state
                .datastore
                .query(
                    &format!(
                        "SELECT {PLAY_COLUMNS} FROM plays p JOIN games g ON g.id = p.game_id \
                         ORDER BY p.played_at DESC, p.id DESC LIMIT $1 OFFSET $2"
                    ),
                    &[SqlValue::int(page.limit), SqlValue::int(page.offset)],
                )
                .await
                .map_err(|err| ApiError::from_domain("listing plays", err))?;
            (total, rows)
        }
    };

    Ok(envelope::respond_paginated(rows, total, page.limit, page.offset))
}

/// GET /v1/plays/{id}
pub async fn get(ctx: RequestContext) -> Result<Response, ApiError> {
    let id = super::parse_id(&ctx, "INVALID_PLAY_ID")?;

    let rows = ctx
        .state
        .datastore
        .query(
            &format!(
                "SELECT {PLAY_COLUMNS} FROM plays p JOIN games g ON g.id = p.game_id \
                 WHERE p.id = $1"
            ),
            &[SqlValue::int(id)],
        )
        .await
        .map_err(|err| ApiError::from_domain("fetching play", err))?;

    let play = rows.into_iter().next().ok_or_else(|| {
        ApiError::not_found("PLAY_NOT_FOUND", format!("Play {} not found", id))
    })?;

    Ok(envelope::respond(play))
}

/// POST /v1/plays
pub async fn create(ctx: RequestContext) -> Result<Response, ApiError> {
    let request: CreatePlayRequest = parse_json_body(&ctx.body)?;
    request
        .validate()
        .map_err(|message| ApiError::bad_request("VALIDATION_ERROR", message))?;

    // The referenced game must exist; surfacing this as validation beats a
    // foreign-key error from the store.
    let games = ctx
        .state
        .datastore
        .query(
            "SELECT id FROM games WHERE id = $1",
            &[SqlValue::int(request.game_id)],
        )
        .await
        .map_err(|err| ApiError::from_domain("creating play", err))?;
    if games.is_empty() {
        return Err(ApiError::bad_request(
            "VALIDATION_ERROR",
            format!("game {} does not exist", request.game_id),
        ));
    }

    debug!(game_id = request.game_id, "Recording play");

    let players = serde_json::to_value(&request.players)
        .map_err(|_| ApiError::internal("recording play"))?;

    let rows = ctx
        .state
        .datastore
        .query(
            "INSERT INTO plays (game_id, played_at, location, notes, players) \
             VALUES ($1, $2::date, $3, $4, $5) \
             RETURNING id, game_id, played_at, location, notes, players, created_at",
            &[
                SqlValue::int(request.game_id),
                SqlValue::text(request.played_at.to_string()),
                SqlValue::Text(request.location),
                SqlValue::Text(request.notes),
                SqlValue::json(players),
            ],
        )
        .await
        .map_err(|err| ApiError::from_domain("recording play", err))?;

    let play = rows
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::internal("recording play"))?;

    Ok(envelope::respond_with_status(play, StatusCode::CREATED))
}

/// DELETE /v1/plays/{id}
pub async fn delete(ctx: RequestContext) -> Result<Response, ApiError> {
    let id = super::parse_id(&ctx, "INVALID_PLAY_ID")?;

    let affected = ctx
        .state
        .datastore
        .execute("DELETE FROM plays WHERE id = $1", &[SqlValue::int(id)])
        .await
        .map_err(|err| ApiError::from_domain("deleting play", err))?;

    if affected == 0 {
        return Err(ApiError::not_found(
            "PLAY_NOT_FOUND",
            format!("Play {} not found", id),
        ));
    }

    Ok(envelope::respond(json!({ "deleted": true, "id": id })))
}
