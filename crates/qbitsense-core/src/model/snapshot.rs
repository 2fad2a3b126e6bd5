// ── Snapshot domain types ──

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One point-in-time view of the torrent client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub server_state: ServerState,
    /// Torrent hash → torrent.
    pub torrents: HashMap<String, Torrent>,
}

/// Client-wide transfer counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerState {
    pub download_speed_bytes_per_sec: u64,
    pub upload_speed_bytes_per_sec: u64,
}

/// A single torrent as reported by the client.
///
/// `downloaded_bytes <= size_bytes` is expected but not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Torrent {
    /// Raw state label, e.g. `downloading` or `stalledUP`.
    pub state: String,
    pub size_bytes: u64,
    pub downloaded_bytes: u64,
    /// Seconds remaining. The client reports `8640000` when unknown.
    pub eta_seconds: i64,
}

impl Torrent {
    pub fn new(state: impl Into<String>, size_bytes: u64, downloaded_bytes: u64) -> Self {
        Self {
            state: state.into(),
            size_bytes,
            downloaded_bytes,
            eta_seconds: 0,
        }
    }

    pub fn with_eta(mut self, eta_seconds: i64) -> Self {
        self.eta_seconds = eta_seconds;
        self
    }
}

impl Snapshot {
    pub fn new(download_speed: u64, upload_speed: u64) -> Self {
        Self {
            server_state: ServerState {
                download_speed_bytes_per_sec: download_speed,
                upload_speed_bytes_per_sec: upload_speed,
            },
            torrents: HashMap::new(),
        }
    }

    /// Add or replace a torrent, keyed by hash.
    pub fn with_torrent(mut self, hash: impl Into<String>, torrent: Torrent) -> Self {
        self.torrents.insert(hash.into(), torrent);
        self
    }
}
