use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use planner_common::Config;
use planner_store::PgEventRowStore;
use planner_web::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("planner=info".parse()?))
        .init();

    let config = Config::web_from_env()?;
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL environment variable is required")?;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    let rows = PgEventRowStore::new(pool);
    rows.ensure_schema().await?;
    info!("Connected to database");

    let app = build_router(AppState {
        rows: Arc::new(rows),
    });

    let addr = config.addr();
    info!("Event planner web UI starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
