//! boardlog
//!
//! REST API over a relational store for tracking board game plays and the
//! statistics derived from them. Every request flows through a CORS
//! preflight short-circuit, an API-key authenticator, and a declarative
//! first-match-wins route table before reaching the SQL glue behind each
//! endpoint.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::{info, warn};

use api::middleware::Authenticator;
use api::state::AppState;
use domain::auth::KeyRing;
use infrastructure::datastore::PostgresDatastore;

/// Create the application state from configuration and environment.
///
/// The key ring and route table are built exactly once here and injected;
/// nothing downstream reads ambient configuration.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

    info!("Connecting to PostgreSQL...");
    let pool = sqlx::PgPool::connect(&database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("PostgreSQL connection established");

    let auth_config = config.auth.clone().with_env_overrides();
    let keys = KeyRing::parse(&auth_config.api_keys);

    if auth_config.require_auth {
        if keys.is_empty() {
            warn!("REQUIRE_AUTH is enabled but no API keys are configured; every keyed request will be rejected");
        }
        info!(keys = keys.len(), "API key authentication enabled");
    } else {
        warn!(
            "Authentication disabled; all requests receive full permissions. \
             Set REQUIRE_AUTH=true for any access-controlled deployment."
        );
    }

    let authenticator = Arc::new(Authenticator::new(keys, auth_config.require_auth));
    let routes = Arc::new(api::v1::routes());

    Ok(AppState::new(
        Arc::new(PostgresDatastore::new(pool)),
        authenticator,
        routes,
    ))
}
