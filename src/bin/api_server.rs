// HTTP API binary serving the movie dashboard views

use std::sync::Arc;

use anyhow::Result;
use movie_dash::api::ApiServer;
use movie_dash::database_ops::movies::store_from_env;
use movie_dash::logging::{init_tracing, LogSink};
use movie_dash::util::env as env_util;
use movie_dash::CatalogService;

#[actix_web::main]
async fn main() -> Result<()> {
    env_util::init_env();
    init_tracing("info,sqlx=warn", LogSink::Stdout)?;

    tracing::info!("Initializing movie-dash API server");
    env_util::preflight_check(
        "api_server",
        &[],
        &[
            "MOVIES_FILE",
            "MOVIES_DB_URL",
            "DATABASE_URL",
            "MOVIES_COLLECTION",
            "CATALOG_CACHE_TTL_SECS",
            "API_HOST",
            "API_PORT",
            "API_SECRET",
            "ALLOWED_ORIGINS",
            "SESSION_IDLE_SECS",
            "MAX_SESSIONS",
        ],
    )?;

    let server = ApiServer::from_env()?;

    // A store that cannot be reached at startup is fatal; no retry.
    let store = store_from_env().await?;
    tracing::info!(store = %store.describe(), "movie store ready");
    let catalog = CatalogService::from_env(Arc::from(store));

    server.run(catalog).await?;

    Ok(())
}
