//! Game endpoints: SQL glue over the datastore

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::json;
use tracing::debug;

use crate::api::envelope;
use crate::api::routing::RequestContext;
use crate::api::types::{
    parse_json_body, ApiError, CreateGameRequest, PageParams, UpdateGameRequest,
};
use crate::domain::SqlValue;

const GAME_COLUMNS: &str =
    "id, bgg_id, name, min_players, max_players, playtime_minutes, created_at";

/// GET /v1/games
pub async fn list(ctx: RequestContext) -> Result<Response, ApiError> {
    let page = PageParams::from_query(&ctx.query);
    debug!(limit = page.limit, offset = page.offset, "Listing games");

    let total = super::count_rows(&ctx, "SELECT COUNT(*) AS total FROM games", &[]).await?;
    let rows = ctx
        .state
        .datastore
        .query(
            &format!("SELECT {GAME_COLUMNS} FROM games ORDER BY name, id LIMIT $1 OFFSET $2"),
            &[SqlValue::int(page.limit), SqlValue::int(page.offset)],
        )
        .await
        .map_err(|err| ApiError::from_domain("listing games", err))?;

    Ok(envelope::respond_paginated(rows, total, page.limit, page.offset))
}

/// GET /v1/games/{id}
pub async fn get(ctx: RequestContext) -> Result<Response, ApiError> {
    let id = super::parse_id(&ctx, "INVALID_GAME_ID")?;

    let rows = ctx
        .state
        .datastore
        .query(
            &format!("SELECT {GAME_COLUMNS} FROM games WHERE id = $1"),
            &[SqlValue::int(id)],
        )
        .await
        .map_err(|err| ApiError::from_domain("fetching game", err))?;

    let game = rows.into_iter().next().ok_or_else(|| {
        ApiError::not_found("GAME_NOT_FOUND", format!("Game {} not found", id))
    })?;

    Ok(envelope::respond(game))
}

/// POST /v1/games
pub async fn create(ctx: RequestContext) -> Result<Response, ApiError> {
    let request: CreateGameRequest = parse_json_body(&ctx.body)?;
    request
        .validate()
        .map_err(|message| ApiError::bad_request("VALIDATION_ERROR", message))?;

    debug!(name = %request.name, "Creating game");

    let rows = ctx
        .state
        .datastore
        .query(
            &format!(
                "INSERT INTO games (bgg_id, name, min_players, max_players, playtime_minutes) \
                 VALUES ($1, $2, $3, $4, $5) RETURNING {GAME_COLUMNS}"
            ),
            &[
                SqlValue::Int(request.bgg_id),
                SqlValue::text(request.name.trim()),
                SqlValue::Int(request.min_players),
                SqlValue::Int(request.max_players),
                SqlValue::Int(request.playtime_minutes),
            ],
        )
        .await
        .map_err(|err| ApiError::from_domain("creating game", err))?;

    let game = rows
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::internal("creating game"))?;

    Ok(envelope::respond_with_status(game, StatusCode::CREATED))
}

/// PUT /v1/games/{id}
pub async fn update(ctx: RequestContext) -> Result<Response, ApiError> {
    let id = super::parse_id(&ctx, "INVALID_GAME_ID")?;
    let request: UpdateGameRequest = parse_json_body(&ctx.body)?;
    request
        .validate()
        .map_err(|message| ApiError::bad_request("VALIDATION_ERROR", message))?;

    let rows = ctx
        .state
        .datastore
        .query(
            &format!(
                "UPDATE games SET \
                 bgg_id = COALESCE($2, bgg_id), \
                 name = COALESCE($3, name), \
                 min_players = COALESCE($4, min_players), \
                 max_players = COALESCE($5, max_players), \
                 playtime_minutes = COALESCE($6, playtime_minutes) \
                 WHERE id = $1 RETURNING {GAME_COLUMNS}"
            ),
            &[
                SqlValue::int(id),
                SqlValue::Int(request.bgg_id),
                SqlValue::Text(request.name.as_ref().map(|name| name.trim().to_string())),
                SqlValue::Int(request.min_players),
                SqlValue::Int(request.max_players),
                SqlValue::Int(request.playtime_minutes),
            ],
        )
        .await
        .map_err(|err| ApiError::from_domain("updating game", err))?;

    let game = rows.into_iter().next().ok_or_else(|| {
        ApiError::not_found("GAME_NOT_FOUND", format!("Game {} not found", id))
    })?;

    Ok(envelope::respond(game))
}

/// DELETE /v1/games/{id}
pub async fn delete(ctx: RequestContext) -> Result<Response, ApiError> {
    let id = super::parse_id(&ctx, "INVALID_GAME_ID")?;

    let affected = ctx
        .state
        .datastore
        .execute("DELETE FROM games WHERE id = $1", &[SqlValue::int(id)])
        .await
        .map_err(|err| ApiError::from_domain("deleting game", err))?;

    if affected == 0 {
        return Err(ApiError::not_found(
            "GAME_NOT_FOUND",
            format!("Game {} not found", id),
        ));
    }

    Ok(envelope::respond(json!({ "deleted": true, "id": id })))
}
