// qbitsense-core: Metric derivation and poll-cycle state between qbitsense-api and consumers.

pub mod config;
pub mod convert;
pub mod engine;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod poller;
pub mod sensor;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientConfig, Credentials, InstanceIdentity, TlsVerification};
pub use engine::{compute, format_speed};
pub use error::CoreError;
pub use fetcher::{QbitFetcher, SnapshotFetcher};
pub use poller::{PollOutcome, Poller};
pub use sensor::{
    DeviceClass, InstanceIdentityView, SENSOR_DESCRIPTIONS, SensorDescription, SensorKind, SensorReading, SensorSet,
    SensorValue, StateClass,
};

// Re-export model types at the crate root for ergonomics.
pub use model::{CurrentStatus, DerivedMetrics, ServerState, Snapshot, Torrent};
