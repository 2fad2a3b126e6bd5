// Wire types for the qBittorrent Web API
//
// `sync/maindata` supports incremental updates keyed by `rid`, so every
// field is optional on the wire. A full update (`rid=0`) carries all of
// them; `qbitsense-core` decides which ones it requires.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Response of `GET /api/v2/sync/maindata`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MainData {
    /// Response ID, to be echoed back for the next incremental request.
    #[serde(default)]
    pub rid: i64,
    /// Whether the response carries the full state or a delta.
    #[serde(default)]
    pub full_update: bool,
    /// Torrent hash → torrent fields.
    pub torrents: Option<HashMap<String, TorrentInfo>>,
    /// Hashes of torrents removed since the previous `rid`.
    pub torrents_removed: Option<Vec<String>>,
    /// Global transfer info.
    pub server_state: Option<ServerState>,
}

/// Global transfer counters (`server_state` in the maindata payload).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerState {
    /// Global download rate, bytes/s.
    pub dl_info_speed: Option<u64>,
    /// Global upload rate, bytes/s.
    pub up_info_speed: Option<u64>,
    /// Data downloaded this session, bytes.
    pub dl_info_data: Option<u64>,
    /// Data uploaded this session, bytes.
    pub up_info_data: Option<u64>,
    /// `connected`, `firewalled` or `disconnected`.
    pub connection_status: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One torrent entry of the maindata payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TorrentInfo {
    pub name: Option<String>,
    /// State label, e.g. `downloading`, `stalledUP`, `pausedDL`.
    pub state: Option<String>,
    /// Total size of the selected files, bytes.
    pub size: Option<u64>,
    /// Bytes downloaded so far.
    pub downloaded: Option<u64>,
    /// Seconds remaining; `8640000` means unknown.
    pub eta: Option<i64>,
    /// Completion in `[0, 1]`.
    pub progress: Option<f64>,
    pub dlspeed: Option<u64>,
    pub upspeed: Option<u64>,
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn full_update_parses_with_unknown_fields() {
        let body = r#"{
            "rid": 1,
            "full_update": true,
            "torrents": {
                "8c4a5c5b": {
                    "name": "debian.iso",
                    "state": "downloading",
                    "size": 1000,
                    "downloaded": 250,
                    "eta": 120,
                    "progress": 0.25,
                    "num_seeds": 12
                }
            },
            "server_state": {
                "dl_info_speed": 2048,
                "up_info_speed": 0,
                "connection_status": "connected",
                "dht_nodes": 312
            }
        }"#;

        let data: MainData = serde_json::from_str(body).unwrap();
        assert!(data.full_update);

        let torrent = &data.torrents.as_ref().unwrap()["8c4a5c5b"];
        assert_eq!(torrent.state.as_deref(), Some("downloading"));
        assert_eq!(torrent.size, Some(1000));
        assert_eq!(torrent.extra["num_seeds"], 12);

        let server = data.server_state.unwrap();
        assert_eq!(server.dl_info_speed, Some(2048));
        assert_eq!(server.extra["dht_nodes"], 312);
    }

    #[test]
    fn delta_update_leaves_sections_absent() {
        let data: MainData = serde_json::from_str(r#"{"rid": 7}"#).unwrap();
        assert_eq!(data.rid, 7);
        assert!(!data.full_update);
        assert!(data.torrents.is_none());
        assert!(data.server_state.is_none());
    }
}
