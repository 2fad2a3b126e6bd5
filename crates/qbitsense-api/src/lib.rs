// qbitsense-api: Async Rust client for the qBittorrent Web API (v2)

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::QbitClient;
pub use error::Error;
pub use models::{MainData, ServerState, TorrentInfo};
pub use transport::{TlsMode, TransportConfig};
