// ── Metric engine ──
//
// Pure mapping from a Snapshot to the nine DerivedMetrics values.
// No I/O, no hidden state: the same snapshot always yields the same output.

use crate::model::{CurrentStatus, DerivedMetrics, ServerState, Snapshot, Torrent};

/// State labels counted as "downloading".
pub const DOWNLOADING_STATES: &[&str] = &["downloading", "forceDL"];

/// State labels counted as "seeding".
pub const SEEDING_STATES: &[&str] = &["stalledUP", "forcedUP", "queuedUP"];

/// State labels counted as "paused".
pub const PAUSED_STATES: &[&str] = &["pausedDL"];

/// State labels whose bytes are weighted into the download percentage.
///
/// Spelled `forcedDL` here but `forceDL` in [`DOWNLOADING_STATES`]; the two
/// sets must stay distinct.
pub const PERCENT_STATES: &[&str] = &["downloading", "forcedDL", "pausedDL"];

const BYTES_PER_KIB: f64 = 1024.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Compute every derived metric for one snapshot.
pub fn compute(snapshot: &Snapshot) -> DerivedMetrics {
    let server = &snapshot.server_state;
    let torrents = &snapshot.torrents;

    DerivedMetrics {
        current_status: classify_status(server),
        download_speed_kib_s: format_speed(server.download_speed_bytes_per_sec),
        upload_speed_kib_s: format_speed(server.upload_speed_bytes_per_sec),
        total_count: torrents.len(),
        downloading_count: count_in(torrents.values(), DOWNLOADING_STATES),
        seeding_count: count_in(torrents.values(), SEEDING_STATES),
        paused_count: count_in(torrents.values(), PAUSED_STATES),
        download_percent: download_percent(torrents.values()),
        highest_eta_minutes: highest_eta_minutes(torrents.values()),
    }
}

/// Classify overall activity from the global speeds.
pub fn classify_status(server: &ServerState) -> CurrentStatus {
    let down = server.download_speed_bytes_per_sec;
    let up = server.upload_speed_bytes_per_sec;

    match (up > 0, down > 0) {
        (true, true) => CurrentStatus::UpDown,
        (true, false) => CurrentStatus::Seeding,
        (false, true) => CurrentStatus::Downloading,
        (false, false) => CurrentStatus::Idle,
    }
}

/// Count torrents whose state label is a member of `states`.
pub fn count_in<'a>(torrents: impl IntoIterator<Item = &'a Torrent>, states: &[&str]) -> usize {
    torrents
        .into_iter()
        .filter(|t| states.contains(&t.state.as_str()))
        .count()
}

/// Byte-weighted completion of the torrents in [`PERCENT_STATES`].
///
/// `0.0` when nothing matches or the matching torrents have no size.
pub fn download_percent<'a>(torrents: impl IntoIterator<Item = &'a Torrent>) -> f64 {
    let (total, downloaded) = torrents
        .into_iter()
        .filter(|t| PERCENT_STATES.contains(&t.state.as_str()))
        .fold((0_u128, 0_u128), |(total, downloaded), t| {
            (
                total + u128::from(t.size_bytes),
                downloaded + u128::from(t.downloaded_bytes),
            )
        });

    if total == 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    let ratio = downloaded as f64 / total as f64;
    round_to(ratio * 100.0, 2)
}

/// Largest ETA across all torrents, in minutes.
///
/// The scan starts at zero, so negative ETAs never win and an empty set
/// reports `0.0`. The "unknown" sentinel is compared like any other value.
pub fn highest_eta_minutes<'a>(torrents: impl IntoIterator<Item = &'a Torrent>) -> f64 {
    let highest = torrents
        .into_iter()
        .map(|t| t.eta_seconds)
        .fold(0_i64, i64::max);

    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    let seconds = highest as f64;
    round_to(seconds / SECONDS_PER_MINUTE, 2)
}

/// Convert bytes/s to KiB/s.
///
/// Values below 0.1 KiB/s keep two decimals, everything else one.
pub fn format_speed(bytes_per_sec: u64) -> f64 {
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    let bytes = bytes_per_sec as f64;
    format_speed_f64(bytes)
}

/// [`format_speed`] for fractional byte rates.
pub fn format_speed_f64(bytes_per_sec: f64) -> f64 {
    let kib = bytes_per_sec / BYTES_PER_KIB;
    if kib < 0.1 {
        round_to(kib, 2)
    } else {
        round_to(kib, 1)
    }
}

/// Round to `places` decimals.
///
/// Works on the float's exact decimal expansion and breaks ties to even,
/// so `0.25` becomes `0.2` and `0.125` becomes `0.12`. Scaling by a power
/// of ten and calling `f64::round` would push both up instead.
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}
