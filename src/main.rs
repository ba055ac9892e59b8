use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{Config, StoreKind};
use store::{InMemoryStore, PostgresStore, TransactionStore};

mod config;
mod error;
mod handlers;
mod ledger;
mod model;
mod schema;
mod store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    match &config.store {
        StoreKind::Memory => {
            info!("using in-memory store");
            serve(&config, InMemoryStore::new()).await
        }
        StoreKind::Postgres { url, pool_size } => {
            info!(pool_size, "using postgres store");
            let store = PostgresStore::connect(url, *pool_size)?;
            store.mount().await?;
            serve(&config, store).await
        }
    }
}

async fn serve<S: TransactionStore>(config: &Config, store: S) -> anyhow::Result<()> {
    store::seed_clients(&store, &schema::SEED_CLIENTS)
        .await
        .context("error seeding clients")?;

    let app = handlers::router(Arc::new(store));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("error listening on {addr}"))?;
    info!("listening on {addr}");

    axum::serve(listener, app).await.context("error serving app")
}
