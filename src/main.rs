use anyhow::Result;
use tracing_subscriber::EnvFilter;

use casalink::{config::AppConfig, create_app};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().await?;
    let addr = config.server_address();
    let app = create_app(config);

    tracing::info!("Starting CasaLink server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
