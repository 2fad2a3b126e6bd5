// ── Domain model ──
//
// Snapshot is the engine's input, DerivedMetrics its output. Both live
// for exactly one poll cycle.

mod metrics;
mod snapshot;

pub use metrics::{CurrentStatus, DerivedMetrics};
pub use snapshot::{ServerState, Snapshot, Torrent};
