//! Per-connection broadcast loop

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::ephemeris::compute_position;

/// Why a session stopped
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Outbound side of one peer connection
pub trait Transport: Send {
    /// Send one text frame to the peer
    fn send_text(&mut self, text: String) -> impl Future<Output = Result<(), SessionError>> + Send;

    /// Resolve once the peer is gone. Raced against the tick timer, so it must be
    /// cancel-safe.
    fn closed(&mut self) -> impl Future<Output = SessionError> + Send;
}

/// Source of "now" for each tick
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock in UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Result of a finished session
#[derive(Debug)]
pub struct SessionSummary {
    pub frames_sent: u64,
    pub reason: SessionError,
}

/// Pushes the Moon's position to one peer every `interval` until the peer goes away
pub struct BroadcastSession<T, C> {
    transport: T,
    clock: C,
    interval: Duration,
    frames_sent: u64,
}

impl<T: Transport, C: Clock> BroadcastSession<T, C> {
    pub fn new(transport: T, clock: C, interval: Duration) -> Self {
        Self {
            transport,
            clock,
            interval,
            frames_sent: 0,
        }
    }

    /// Compute the current position and send it as one frame
    async fn tick(&mut self) -> Result<(), SessionError> {
        let position = compute_position(self.clock.now());
        tracing::debug!(%position, "Sending lunar position");

        self.transport.send_text(position.to_string()).await?;
        self.frames_sent += 1;
        Ok(())
    }

    /// Run until the peer disconnects. The transport is dropped on return.
    pub async fn run(mut self) -> SessionSummary {
        let reason = loop {
            if let Err(e) = self.tick().await {
                break e;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                reason = self.transport.closed() => break reason,
            }
        };

        match &reason {
            SessionError::ConnectionClosed => {
                tracing::info!(frames_sent = self.frames_sent, "Client just disconnected");
            }
            SessionError::Transport(e) => {
                tracing::warn!(
                    frames_sent = self.frames_sent,
                    "Client disconnected (transport error): {}",
                    e
                );
            }
        }

        SessionSummary {
            frames_sent: self.frames_sent,
            reason,
        }
    }
}
