use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use planner_api::{build_router, AppState};
use planner_common::Config;
use planner_store::{DocumentStore, FileDocumentStore, PgDocumentStore};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("planner=info".parse()?))
        .init();

    let config = Config::api_from_env()?;

    let store: Arc<dyn DocumentStore> = match &config.database_url {
        Some(url) => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await?;
            let store = PgDocumentStore::new(pool);
            store.ensure_schema().await?;
            info!("Plan data stored in Postgres");
            Arc::new(store)
        }
        None => {
            info!(path = %config.data_file.display(), "Plan data stored on disk");
            Arc::new(FileDocumentStore::new(&config.data_file))
        }
    };

    // Seed on startup rather than on the first request.
    if config.seed_defaults {
        store.get().await?;
    }

    let state = AppState {
        store,
        seed_defaults: config.seed_defaults,
        storage_configured: config.database_url.is_some(),
    };
    let app = build_router(state, &config.static_dir);

    let addr = config.addr();
    info!("Event planner API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
