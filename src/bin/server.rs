//! `lookalike-server`: serves the impersonation lookup HTTP API.
//!
//! Configuration comes from environment variables (and a `.env` file when
//! present); see `ServiceConfig` for the full list.

use lookalike::{ServiceConfig, serve};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("lookalike-server starting");

    let config = ServiceConfig::from_env()?;
    serve(config).await
}
