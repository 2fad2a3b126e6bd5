// ── Sensor catalogue and per-instance sensor state ──
//
// `SENSOR_DESCRIPTIONS` is the fixed, process-wide table of the nine
// metric slots. `SensorSet` is the mutable side: current values plus the
// availability flag of one configured client.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

use crate::config::InstanceIdentity;
use crate::model::{CurrentStatus, DerivedMetrics};

pub const UNIT_KIB_PER_SECOND: &str = "KiB/s";
pub const UNIT_MINUTES: &str = "minutes";
pub const UNIT_PERCENT: &str = "%";

/// Identifies one of the nine metric slots. The string form is the sensor key.
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
    EnumIter,
    EnumCount,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SensorKind {
    CurrentStatus,
    DownloadSpeed,
    UploadSpeed,
    #[serde(rename = "number_total")]
    #[strum(serialize = "number_total")]
    TotalNumber,
    HighestEta,
    #[serde(rename = "number_downloading")]
    #[strum(serialize = "number_downloading")]
    DownloadNumber,
    #[serde(rename = "number_seeding")]
    #[strum(serialize = "number_seeding")]
    SeedNumber,
    #[serde(rename = "number_paused")]
    #[strum(serialize = "number_paused")]
    PausedNumber,
    DownloadPercent,
}

/// Home-automation device class hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeviceClass {
    DataRate,
}

/// Home-automation state class hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StateClass {
    Measurement,
}

/// Static display metadata for one metric slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SensorDescription {
    pub kind: SensorKind,
    pub name: &'static str,
    pub unit: Option<&'static str>,
    pub icon: Option<&'static str>,
    pub device_class: Option<DeviceClass>,
    pub state_class: Option<StateClass>,
}

impl SensorDescription {
    pub fn key(&self) -> &'static str {
        self.kind.into()
    }
}

const ICON_UPLOAD: Option<&str> = Some("mdi:cloud-upload");

/// The nine metric slots, in registration order.
pub static SENSOR_DESCRIPTIONS: [SensorDescription; SensorKind::COUNT] = [
    SensorDescription {
        kind: SensorKind::CurrentStatus,
        name: "Status",
        unit: None,
        icon: None,
        device_class: None,
        state_class: None,
    },
    SensorDescription {
        kind: SensorKind::DownloadSpeed,
        name: "Down Speed",
        unit: Some(UNIT_KIB_PER_SECOND),
        icon: Some("mdi:cloud-download"),
        device_class: Some(DeviceClass::DataRate),
        state_class: Some(StateClass::Measurement),
    },
    SensorDescription {
        kind: SensorKind::UploadSpeed,
        name: "Up Speed",
        unit: Some(UNIT_KIB_PER_SECOND),
        icon: ICON_UPLOAD,
        device_class: Some(DeviceClass::DataRate),
        state_class: Some(StateClass::Measurement),
    },
    SensorDescription {
        kind: SensorKind::TotalNumber,
        name: "Total Torrents",
        unit: None,
        icon: ICON_UPLOAD,
        device_class: None,
        state_class: None,
    },
    SensorDescription {
        kind: SensorKind::HighestEta,
        name: "Highest ETA",
        unit: Some(UNIT_MINUTES),
        icon: ICON_UPLOAD,
        device_class: None,
        state_class: Some(StateClass::Measurement),
    },
    SensorDescription {
        kind: SensorKind::DownloadNumber,
        name: "Torrents Downloading",
        unit: None,
        icon: ICON_UPLOAD,
        device_class: None,
        state_class: None,
    },
    SensorDescription {
        kind: SensorKind::SeedNumber,
        name: "Torrents Seeding",
        unit: None,
        icon: ICON_UPLOAD,
        device_class: None,
        state_class: None,
    },
    SensorDescription {
        kind: SensorKind::PausedNumber,
        name: "Torrents Paused",
        unit: None,
        icon: ICON_UPLOAD,
        device_class: None,
        state_class: None,
    },
    SensorDescription {
        kind: SensorKind::DownloadPercent,
        name: "Download Percentage",
        unit: Some(UNIT_PERCENT),
        icon: ICON_UPLOAD,
        device_class: None,
        state_class: None,
    },
];

impl SensorKind {
    /// Static metadata for this slot.
    pub fn description(self) -> &'static SensorDescription {
        // The table is declared in enum order.
        &SENSOR_DESCRIPTIONS[self as usize]
    }

    /// Pick this slot's value out of a metric set.
    pub fn value_of(self, metrics: &DerivedMetrics) -> SensorValue {
        match self {
            Self::CurrentStatus => SensorValue::Status(metrics.current_status),
            Self::DownloadSpeed => SensorValue::Measurement(metrics.download_speed_kib_s),
            Self::UploadSpeed => SensorValue::Measurement(metrics.upload_speed_kib_s),
            Self::TotalNumber => SensorValue::Count(metrics.total_count),
            Self::HighestEta => SensorValue::Measurement(metrics.highest_eta_minutes),
            Self::DownloadNumber => SensorValue::Count(metrics.downloading_count),
            Self::SeedNumber => SensorValue::Count(metrics.seeding_count),
            Self::PausedNumber => SensorValue::Count(metrics.paused_count),
            Self::DownloadPercent => SensorValue::Measurement(metrics.download_percent),
        }
    }
}

/// A sensor's native value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorValue {
    Status(CurrentStatus),
    Count(usize),
    Measurement(f64),
}

impl fmt::Display for SensorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(s) => write!(f, "{s}"),
            Self::Count(n) => write!(f, "{n}"),
            // Whole measurements keep their decimal point: `15.0`, not `15`.
            Self::Measurement(v) => write!(f, "{v:?}"),
        }
    }
}

/// One sensor as a host platform would register it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReading {
    pub key: &'static str,
    pub unique_id: String,
    pub name: String,
    pub unit: Option<&'static str>,
    pub icon: Option<&'static str>,
    pub device_class: Option<DeviceClass>,
    pub state_class: Option<StateClass>,
    pub value: Option<SensorValue>,
    pub available: bool,
}

/// Current sensor state for one client instance.
///
/// Starts unavailable with no values. A successful poll fills every slot;
/// a lost connection only clears `available` and keeps the last values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorSet {
    pub identity: InstanceIdentityView,
    pub available: bool,
    pub last_updated: Option<DateTime<Utc>>,
    pub metrics: Option<DerivedMetrics>,
}

/// Serializable copy of the instance identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceIdentityView {
    pub id: String,
    pub name: String,
}

impl From<&InstanceIdentity> for InstanceIdentityView {
    fn from(identity: &InstanceIdentity) -> Self {
        Self {
            id: identity.id.clone(),
            name: identity.name.clone(),
        }
    }
}

impl SensorSet {
    pub fn new(identity: &InstanceIdentity) -> Self {
        Self {
            identity: identity.into(),
            available: false,
            last_updated: None,
            metrics: None,
        }
    }

    /// Replace all nine values and mark the set available.
    pub fn apply(&mut self, metrics: DerivedMetrics, at: DateTime<Utc>) {
        self.metrics = Some(metrics);
        self.available = true;
        self.last_updated = Some(at);
    }

    /// Mark the whole set unavailable, keeping the last values.
    pub fn mark_unavailable(&mut self) {
        self.available = false;
    }

    pub fn value(&self, kind: SensorKind) -> Option<SensorValue> {
        self.metrics.as_ref().map(|m| kind.value_of(m))
    }

    /// All nine sensors in registration order.
    pub fn readings(&self) -> Vec<SensorReading> {
        SENSOR_DESCRIPTIONS
            .iter()
            .map(|d| SensorReading {
                key: d.key(),
                unique_id: format!("{}-{}", self.identity.id, d.key()),
                name: format!("{} {}", self.identity.name, d.name),
                unit: d.unit,
                icon: d.icon,
                device_class: d.device_class,
                state_class: d.state_class,
                value: self.value(d.kind),
                available: self.available,
            })
            .collect()
    }
}
