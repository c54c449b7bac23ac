//! Collection-wide summary statistics

use axum::response::Response;
use serde_json::json;

use crate::api::envelope;
use crate::api::routing::RequestContext;
use crate::api::types::ApiError;

/// GET /v1/stats
pub async fn summary(ctx: RequestContext) -> Result<Response, ApiError> {
    let total_games = super::count_rows(&ctx, "SELECT COUNT(*) AS total FROM games", &[]).await?;
    let total_plays = super::count_rows(&ctx, "SELECT COUNT(*) AS total FROM plays", &[]).await?;
    let distinct_players = super::count_rows(
        &ctx,
        "SELECT COUNT(DISTINCT entry.value->>'name') AS total \
         FROM plays, jsonb_array_elements(players) AS entry",
        &[],
    )
    .await?;
    let plays_last_30_days = super::count_rows(
        &ctx,
        "SELECT COUNT(*) AS total FROM plays \
         WHERE played_at >= CURRENT_DATE - INTERVAL '30 days'",
        &[],
    )
    .await?;

    let most_played = ctx
        .state
        .datastore
        .query(
            "SELECT g.id, g.name, COUNT(p.id) AS plays \
             FROM games g LEFT JOIN plays p ON p.game_id = g.id \
             GROUP BY g.id, g.name ORDER BY plays DESC, g.name LIMIT 5",
            &[],
        )
        .await
        .map_err(|err| ApiError::from_domain("computing stats", err))?;

    Ok(envelope::respond(json!({
        "total_games": total_games,
        "total_plays": total_plays,
        "distinct_players": distinct_players,
        "plays_last_30_days": plays_last_30_days,
        "most_played": most_played,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::v1::testing::{body_json, ctx, row};
    use crate::domain::datastore::MockDatastore;

    #[tokio::test]
    async fn test_summary_composes_counts() {
        let mut datastore = MockDatastore::new();
        datastore.expect_query().times(5).returning(|sql, _| {
            if sql.contains("FROM games g LEFT JOIN") {
                Ok(vec![row(&[
                    ("id", json!(1)),
                    ("name", json!("Root")),
                    ("plays", json!(14)),
                ])])
            } else if sql.contains("DISTINCT") {
                Ok(vec![row(&[("total", json!(6))])])
            } else {
                Ok(vec![row(&[("total", json!(20))])])
            }
        });

        let response = summary(ctx(datastore)).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"]["total_games"], 20);
        assert_eq!(body["data"]["distinct_players"], 6);
        assert_eq!(body["data"]["most_played"][0]["name"], "Root");
    }
}
