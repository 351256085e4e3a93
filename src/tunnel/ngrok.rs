//! Tunnel backed by a local ngrok agent
//!
//! The agent is started as a child process; its public URL is read from the agent's
//! local inspection API once the tunnel is up.

use std::process::Stdio;
use std::time::Duration;

use serde::Deserialize;
use tokio::process::Command;

use super::{PublicTunnel, Tunnel, TunnelError};

const DEFAULT_BINARY: &str = "ngrok";
const DEFAULT_API_URL: &str = "http://127.0.0.1:4040/api/tunnels";
const DEFAULT_POLL_ATTEMPTS: u32 = 40;
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Response of `GET /api/tunnels`
#[derive(Debug, Clone, Deserialize)]
pub struct TunnelList {
    pub tunnels: Vec<TunnelInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TunnelInfo {
    pub public_url: String,
    pub proto: String,
    #[serde(default)]
    pub config: Option<TunnelConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TunnelConfig {
    pub addr: String,
}

/// Pick the TLS-terminated tunnel forwarding to `port`.
///
/// Tunnels without a reported upstream address are accepted.
pub fn select_public_url(list: &TunnelList, port: u16) -> Option<String> {
    let suffix = format!(":{}", port);

    list.tunnels
        .iter()
        .filter(|t| t.proto == "https")
        .find(|t| match &t.config {
            Some(config) => config.addr.ends_with(&suffix),
            None => true,
        })
        .map(|t| t.public_url.clone())
}

/// ngrok agent settings
#[derive(Debug, Clone)]
pub struct NgrokTunnel {
    pub binary: String,
    pub api_url: String,
    pub poll_attempts: u32,
    pub poll_interval: Duration,
}

impl Default for NgrokTunnel {
    fn default() -> Self {
        Self {
            binary: DEFAULT_BINARY.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            poll_attempts: DEFAULT_POLL_ATTEMPTS,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl NgrokTunnel {
    /// `ngrok http <port>` with its console output discarded
    fn agent_command(&self, port: u16) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .arg("http")
            .arg(port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        command
    }

    async fn fetch_tunnels(&self, client: &reqwest::Client) -> Result<TunnelList, TunnelError> {
        let list = client
            .get(&self.api_url)
            .send()
            .await?
            .error_for_status()?
            .json::<TunnelList>()
            .await?;
        Ok(list)
    }
}

impl Tunnel for NgrokTunnel {
    async fn open(&self, port: u16) -> Result<PublicTunnel, TunnelError> {
        tracing::info!(port, "Starting ngrok agent");

        let mut agent = self
            .agent_command(port)
            .spawn()
            .map_err(TunnelError::Spawn)?;

        let client = reqwest::Client::new();

        for attempt in 1..=self.poll_attempts {
            tokio::time::sleep(self.poll_interval).await;

            if let Some(status) = agent.try_wait().map_err(TunnelError::AgentStatus)? {
                return Err(TunnelError::AgentExited(status));
            }

            match self.fetch_tunnels(&client).await {
                Ok(list) => {
                    if let Some(url) = select_public_url(&list, port) {
                        return Ok(PublicTunnel::new(url, Some(agent)));
                    }
                    tracing::debug!(attempt, "ngrok agent up, tunnel not ready yet");
                }
                Err(e) => tracing::debug!(attempt, "ngrok agent API not ready: {}", e),
            }
        }

        Err(TunnelError::Unavailable {
            attempts: self.poll_attempts,
        })
    }
}
