//! Public forwarding address for the local WebSocket port

pub mod ngrok;

use std::future::Future;
use std::process::ExitStatus;

use thiserror::Error;
use tokio::process::Child;

pub use ngrok::NgrokTunnel;

/// Errors that can occur while opening a tunnel
#[derive(Error, Debug)]
pub enum TunnelError {
    #[error("Failed to start tunnel agent: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Failed to check tunnel agent status: {0}")]
    AgentStatus(#[source] std::io::Error),

    #[error("Tunnel agent API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Tunnel agent exited early: {0}")]
    AgentExited(ExitStatus),

    #[error("No public HTTPS tunnel after {attempts} attempts")]
    Unavailable { attempts: u32 },
}

/// Something that can hand out a public URL forwarding to a local port
pub trait Tunnel: Send + Sync {
    fn open(&self, port: u16) -> impl Future<Output = Result<PublicTunnel, TunnelError>> + Send;
}

/// An open tunnel. Dropping it stops the agent process, if there is one.
#[derive(Debug)]
pub struct PublicTunnel {
    public_url: String,
    _agent: Option<Child>,
}

impl PublicTunnel {
    pub fn new(public_url: impl Into<String>, agent: Option<Child>) -> Self {
        Self {
            public_url: public_url.into(),
            _agent: agent,
        }
    }

    pub fn public_url(&self) -> &str {
        &self.public_url
    }
}
