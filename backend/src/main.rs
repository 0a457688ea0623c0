use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use middlo_backend::config::AppConfig;
use middlo_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;
    info!("🚀 Starting MIDDLO backend with config: {:?}", config);

    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state, &config.cors_origin)?;

    let addr = config.bind_socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
