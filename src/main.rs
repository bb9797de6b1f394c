use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use civica_api::store::repository::Repository;
use civica_api::store::rest::RestTableStore;
use civica_api::{app, config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up STORE_URL, STORE_API_KEY, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();

    let default_filter = if config.api.enable_request_logging {
        "civica_api=debug,tower_http=debug"
    } else {
        "civica_api=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    tracing::info!("Starting Civica API in {:?} mode", config.environment);

    let store =
        RestTableStore::from_config(&config.store).context("failed to construct store client")?;
    let state = AppState {
        repository: Repository::new(Arc::new(store)),
    };

    let app = app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("CIVICA_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Civica API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server")?;
    Ok(())
}
