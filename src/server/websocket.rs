//! WebSocket endpoint

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        ConnectInfo, State, WebSocketUpgrade,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpListener;

use super::session::{BroadcastSession, SessionError, SystemClock, Transport};
use super::ServerError;
use crate::config::ServerConfig;

/// State shared by every connection
#[derive(Clone, Debug)]
struct AppState {
    interval: Duration,
    active: Arc<AtomicUsize>,
}

impl AppState {
    fn new(config: &ServerConfig) -> Self {
        Self {
            interval: config.interval,
            active: Arc::new(AtomicUsize::new(0)),
        }
    }
}

/// A WebSocket split into its outbound sink and inbound stream
pub struct WsTransport {
    sink: SplitSink<WebSocket, Message>,
    stream: SplitStream<WebSocket>,
}

impl WsTransport {
    pub fn new(socket: WebSocket) -> Self {
        let (sink, stream) = socket.split();
        Self { sink, stream }
    }
}

impl Transport for WsTransport {
    async fn send_text(&mut self, text: String) -> Result<(), SessionError> {
        self.sink
            .send(Message::Text(text))
            .await
            .map_err(|e| SessionError::Transport(e.to_string()))
    }

    async fn closed(&mut self) -> SessionError {
        // Push-only: anything the client sends is read and dropped
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Close(_))) => {
                    // Flushes the queued Close reply so the closing handshake completes
                    let _ = self.sink.close().await;
                    return SessionError::ConnectionClosed;
                }
                None => return SessionError::ConnectionClosed,
                Some(Err(e)) => return SessionError::Transport(e.to_string()),
                Some(Ok(_)) => continue,
            }
        }
    }
}

/// Router that upgrades a GET on any path to a broadcast session
pub fn router(config: &ServerConfig) -> Router {
    app(AppState::new(config))
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(upgrade_handler))
        .fallback(upgrade_handler)
        .with_state(state)
}

async fn upgrade_handler(
    ws: WebSocketUpgrade,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, peer, state))
}

async fn handle_socket(socket: WebSocket, peer: SocketAddr, state: AppState) {
    let active = state.active.fetch_add(1, Ordering::SeqCst) + 1;
    tracing::info!(%peer, active, "Client connected");

    let summary = BroadcastSession::new(WsTransport::new(socket), SystemClock, state.interval)
        .run()
        .await;

    let active = state.active.fetch_sub(1, Ordering::SeqCst) - 1;
    tracing::debug!(%peer, frames_sent = summary.frames_sent, active, "Session closed");
}

/// Serve connections accepted on an already bound listener
pub async fn serve_listener(
    listener: TcpListener,
    config: &ServerConfig,
) -> Result<(), ServerError> {
    serve_app(listener, router(config)).await
}

async fn serve_app(listener: TcpListener, app: Router) -> Result<(), ServerError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Listening for WebSocket clients on ws://{}", addr);
    }

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Bind the configured address and serve until the process is terminated
pub async fn serve(config: &ServerConfig) -> Result<(), ServerError> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    serve_listener(listener, config).await
}
