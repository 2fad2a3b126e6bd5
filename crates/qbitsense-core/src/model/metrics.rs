// ── Derived metric types ──

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Overall transfer activity, derived from the two global speeds.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CurrentStatus {
    UpDown,
    Seeding,
    Downloading,
    Idle,
}

/// The nine values recomputed on every poll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub current_status: CurrentStatus,
    pub download_speed_kib_s: f64,
    pub upload_speed_kib_s: f64,
    pub total_count: usize,
    pub downloading_count: usize,
    pub seeding_count: usize,
    pub paused_count: usize,
    pub download_percent: f64,
    pub highest_eta_minutes: f64,
}
