//! Broadcast server: tunnel, WebSocket endpoint and per-connection sessions

pub mod session;
pub mod websocket;

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::ServerConfig;
use crate::tunnel::{Tunnel, TunnelError};

pub use session::{BroadcastSession, Clock, SessionError, SessionSummary, SystemClock, Transport};
pub use websocket::{router, serve, serve_listener, WsTransport};

/// Errors that stop the server from starting
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Tunnel error: {0}")]
    Tunnel(#[from] TunnelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Open the public tunnel for the configured port, announce its URL, then serve forever.
///
/// The tunnel stays open for as long as the server runs.
pub async fn run<T: Tunnel>(tunnel: &T, config: &ServerConfig) -> Result<(), ServerError> {
    let public = tunnel.open(config.port).await?;
    tracing::info!(url = public.public_url(), "Public tunnel established");
    println!("testing url is: {}", public.public_url());

    serve(config).await
}
