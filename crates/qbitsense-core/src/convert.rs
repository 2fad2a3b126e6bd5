// ── Wire → domain conversion ──
//
// A full `sync/maindata` update must carry both `torrents` and
// `server_state`, and every torrent must carry the four fields the engine
// reads. Anything less is a fetcher contract violation.

use std::collections::HashMap;

use qbitsense_api::models::{MainData, ServerState as WireServerState, TorrentInfo};

use crate::error::CoreError;
use crate::model::{ServerState, Snapshot, Torrent};

fn missing(what: impl Into<String>) -> CoreError {
    CoreError::MalformedSnapshot {
        reason: format!("missing {}", what.into()),
    }
}

impl TryFrom<WireServerState> for ServerState {
    type Error = CoreError;

    fn try_from(s: WireServerState) -> Result<Self, Self::Error> {
        Ok(Self {
            download_speed_bytes_per_sec: s
                .dl_info_speed
                .ok_or_else(|| missing("server_state.dl_info_speed"))?,
            upload_speed_bytes_per_sec: s
                .up_info_speed
                .ok_or_else(|| missing("server_state.up_info_speed"))?,
        })
    }
}

fn torrent_from_wire(hash: &str, t: TorrentInfo) -> Result<Torrent, CoreError> {
    let field = |name: &str| missing(format!("torrents.{hash}.{name}"));
    Ok(Torrent {
        state: t.state.ok_or_else(|| field("state"))?,
        size_bytes: t.size.ok_or_else(|| field("size"))?,
        downloaded_bytes: t.downloaded.ok_or_else(|| field("downloaded"))?,
        eta_seconds: t.eta.ok_or_else(|| field("eta"))?,
    })
}

impl TryFrom<MainData> for Snapshot {
    type Error = CoreError;

    fn try_from(data: MainData) -> Result<Self, Self::Error> {
        let server_state = data
            .server_state
            .ok_or_else(|| missing("server_state"))?
            .try_into()?;

        let torrents = data
            .torrents
            .ok_or_else(|| missing("torrents"))?
            .into_iter()
            .map(|(hash, t)| {
                let torrent = torrent_from_wire(&hash, t)?;
                Ok((hash, torrent))
            })
            .collect::<Result<HashMap<_, _>, CoreError>>()?;

        Ok(Self {
            server_state,
            torrents,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn wire(body: serde_json::Value) -> MainData {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn full_update_converts() {
        let data = wire(serde_json::json!({
            "rid": 1,
            "full_update": true,
            "torrents": {
                "abc": {
                    "name": "ubuntu.iso",
                    "state": "downloading",
                    "size": 1000,
                    "downloaded": 250,
                    "eta": 60
                }
            },
            "server_state": { "dl_info_speed": 2048, "up_info_speed": 0 }
        }));

        let snap = Snapshot::try_from(data).unwrap();
        assert_eq!(snap.server_state.download_speed_bytes_per_sec, 2048);
        assert_eq!(snap.server_state.upload_speed_bytes_per_sec, 0);
        assert_eq!(
            snap.torrents["abc"],
            Torrent::new("downloading", 1000, 250).with_eta(60)
        );
    }

    #[test]
    fn empty_torrent_map_is_valid() {
        let data = wire(serde_json::json!({
            "torrents": {},
            "server_state": { "dl_info_speed": 0, "up_info_speed": 0 }
        }));
        assert!(Snapshot::try_from(data).unwrap().torrents.is_empty());
    }

    #[test]
    fn missing_torrents_is_malformed() {
        let data = wire(serde_json::json!({
            "server_state": { "dl_info_speed": 0, "up_info_speed": 0 }
        }));
        let err = Snapshot::try_from(data).unwrap_err();
        assert!(
            matches!(err, CoreError::MalformedSnapshot { ref reason } if reason == "missing torrents")
        );
    }

    #[test]
    fn missing_speed_is_malformed() {
        let data = wire(serde_json::json!({
            "torrents": {},
            "server_state": { "dl_info_speed": 0 }
        }));
        let err = Snapshot::try_from(data).unwrap_err();
        assert!(err.to_string().contains("up_info_speed"));
    }

    #[test]
    fn torrent_without_eta_is_malformed() {
        let data = wire(serde_json::json!({
            "torrents": { "abc": { "state": "pausedDL", "size": 1, "downloaded": 0 } },
            "server_state": { "dl_info_speed": 0, "up_info_speed": 0 }
        }));
        let err = Snapshot::try_from(data).unwrap_err();
        assert!(err.to_string().contains("torrents.abc.eta"));
    }
}
