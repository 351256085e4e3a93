//! Lunacast - Moon position broadcaster
//!
//! Streams a low-precision right ascension and declination of the Moon to every
//! WebSocket client every ten seconds, with the local endpoint published through a
//! public tunnel.

pub mod config;
pub mod ephemeris;
pub mod models;
pub mod server;
pub mod tunnel;

pub use config::ServerConfig;
pub use server::run;
