use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use loka_backend_core::{app_config, build_router, initialize_app_state};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before anything reads config
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loka_backend_core=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = app_config::config();
    let bind_address = config.bind_address.clone();

    info!("Starting Loka backend API on {}", bind_address);
    info!("Environment: {}", config.environment);

    let state = initialize_app_state()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))
        .context("Failed to initialize application state")?;

    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    info!("Listening on {}", bind_address);

    axum::serve(listener, router)
        .await
        .context("Server error")?;

    Ok(())
}
