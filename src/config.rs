//! Fixed server settings

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Local port the WebSocket endpoint listens on and the tunnel forwards to
pub const DEFAULT_PORT: u16 = 8080;

/// Time between two position frames on one connection
pub const BROADCAST_INTERVAL: Duration = Duration::from_secs(10);

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub interval: Duration,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            interval: BROADCAST_INTERVAL,
        }
    }
}
