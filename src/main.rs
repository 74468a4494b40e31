use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use movie_favorites::{
    api::{create_router, AppState},
    config::Config,
    db,
    services::{FavoritesStore, TmdbCatalog},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_favorites=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let storage = db::create_store(&config).await?;
    let favorites = FavoritesStore::new(storage, config.favorites_key.clone());
    let catalog = TmdbCatalog::new(
        config.catalog_api_key.clone(),
        config.catalog_api_url.clone(),
        config.catalog_language.clone(),
    );

    let state = AppState::new(favorites, Arc::new(catalog));
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
