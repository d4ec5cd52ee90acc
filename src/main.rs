use diary_heatmap::storage::ENTRIES_KEY;
use diary_heatmap::{AppState, FileBlobStore, ThemeMode, resolve_data_dir, router};
use std::{env, net::SocketAddr, sync::Arc};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_dir = resolve_data_dir();
    let store = FileBlobStore::new(&data_dir);
    info!("storing entries under {}", store.path_for(ENTRIES_KEY).display());

    let theme = match env::var("APP_THEME") {
        Ok(value) => value.parse::<ThemeMode>().unwrap_or_else(|err| {
            warn!("{err}; using light theme");
            ThemeMode::Light
        }),
        Err(_) => ThemeMode::Light,
    };

    let state = AppState::load(Arc::new(store), theme).await;
    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
