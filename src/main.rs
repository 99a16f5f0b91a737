use std::sync::Arc;

use anyhow::Context;
use portfolio_relay::{config::Config, routes, state::AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr.clone();
    let static_dir = config.static_dir.clone();

    if config.has_api_key() {
        tracing::info!(model = %config.model, "completion service configured");
    } else {
        tracing::warn!("OPENAI_API_KEY is not set, chat requests will be answered with 500");
    }

    let state = Arc::new(AppState::new(config));
    let app = routes::create_router(&static_dir).with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!(addr = %bind_addr, static_dir = %static_dir, "portfolio relay listening");
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
