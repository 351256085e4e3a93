//! Lunacast - Entry Point
//!
//! Opens an HTTPS tunnel to the local WebSocket port and streams the Moon's position to
//! every client that connects.

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lunacast::tunnel::NgrokTunnel;
use lunacast::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the public URL
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    tracing::info!("Starting Lunacast server");

    let config = ServerConfig::default();
    let tunnel = NgrokTunnel::default();

    lunacast::run(&tunnel, &config).await?;

    Ok(())
}
