use std::{sync::Arc, time::Duration};

use tracing_subscriber::EnvFilter;

use movie_explorer::{
    config::{Config, FavoritesBackend},
    db::{create_redis_client, FileStorage, KeyValueStore, MemoryStorage, RedisStorage},
    routes::{create_router, AppState},
    services::{CatalogClient, FavoritesStore, TmdbClient},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_explorer=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let catalog: Arc<dyn CatalogClient> = Arc::new(TmdbClient::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?);

    let storage = open_storage(&config).await?;
    let favorites = FavoritesStore::load(storage).await;

    let state = Arc::new(AppState::new(catalog, favorites));

    // Initial browse, the catalog view starts on popular titles
    let initial = state.clone();
    tokio::spawn(async move {
        initial.search.load_popular().await;
    });

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %listener.local_addr()?, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn open_storage(config: &Config) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    let storage: Arc<dyn KeyValueStore> = match config.favorites_backend {
        FavoritesBackend::File => Arc::new(FileStorage::new(config.data_dir.clone())),
        FavoritesBackend::Redis => {
            let client = create_redis_client(&config.redis_url)?;
            Arc::new(RedisStorage::connect(client).await?)
        }
        FavoritesBackend::Memory => Arc::new(MemoryStorage::new()),
    };

    tracing::info!(backend = storage.name(), "Favorites storage ready");
    Ok(storage)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
