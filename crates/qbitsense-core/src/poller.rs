// ── Poll cycle ──
//
// One fetch → compute → assign pass per tick. The outcome of each pass
// decides what happens to the sensor set's availability flag:
//
//   success        → values replaced, available
//   connectivity   → values kept, unavailable
//   authentication → nothing touched
//   anything else  → nothing touched

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::config::InstanceIdentity;
use crate::engine;
use crate::error::CoreError;
use crate::fetcher::SnapshotFetcher;
use crate::model::DerivedMetrics;
use crate::sensor::SensorSet;

const MIN_PERIOD: Duration = Duration::from_secs(1);

/// What a single poll cycle did.
#[derive(Debug)]
pub enum PollOutcome {
    /// All nine values were replaced.
    Updated(DerivedMetrics),
    /// The client could not be reached; the set is now unavailable.
    Unavailable { error: CoreError },
    /// The session was rejected; the set was left as it was.
    AuthenticationFailed { error: CoreError },
    /// The cycle was abandoned for another reason; the set was left as it was.
    Aborted { error: CoreError },
}

impl PollOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated(_))
    }

    pub fn error(&self) -> Option<&CoreError> {
        match self {
            Self::Updated(_) => None,
            Self::Unavailable { error }
            | Self::AuthenticationFailed { error }
            | Self::Aborted { error } => Some(error),
        }
    }

    /// Convert to a `Result`, keeping the metrics on success.
    pub fn into_result(self) -> Result<DerivedMetrics, CoreError> {
        match self {
            Self::Updated(metrics) => Ok(metrics),
            Self::Unavailable { error }
            | Self::AuthenticationFailed { error }
            | Self::Aborted { error } => Err(error),
        }
    }
}

/// Owns the sensor set of one client instance and drives its updates.
///
/// Cheaply cloneable; clones share the fetcher and the sensor state.
/// Observers get the current set through [`subscribe`](Self::subscribe).
pub struct Poller<F> {
    inner: Arc<PollerInner<F>>,
}

struct PollerInner<F> {
    fetcher: F,
    sensors: watch::Sender<SensorSet>,
    /// Held for the duration of a cycle so cycles never overlap.
    cycle: Mutex<()>,
}

impl<F> Clone for Poller<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: SnapshotFetcher> Poller<F> {
    /// Create a poller with an unavailable, empty sensor set.
    pub fn new(fetcher: F, identity: &InstanceIdentity) -> Self {
        let (sensors, _) = watch::channel(SensorSet::new(identity));
        Self {
            inner: Arc::new(PollerInner {
                fetcher,
                sensors,
                cycle: Mutex::new(()),
            }),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.inner.fetcher
    }

    /// Current sensor set.
    pub fn sensors(&self) -> SensorSet {
        self.inner.sensors.borrow().clone()
    }

    /// Subscribe to sensor set changes. Every completed cycle that touched
    /// the set notifies receivers.
    pub fn subscribe(&self) -> watch::Receiver<SensorSet> {
        self.inner.sensors.subscribe()
    }

    /// Run one fetch → compute → assign cycle.
    pub async fn poll_once(&self) -> PollOutcome {
        let _cycle = self.inner.cycle.lock().await;

        match self.inner.fetcher.fetch().await {
            Ok(snapshot) => {
                let metrics = engine::compute(&snapshot);
                self.inner
                    .sensors
                    .send_modify(|set| set.apply(metrics, Utc::now()));
                debug!(
                    status = %metrics.current_status,
                    torrents = metrics.total_count,
                    "sensors updated"
                );
                PollOutcome::Updated(metrics)
            }
            Err(error) if error.is_connectivity() => {
                error!(error = %error, "connection lost");
                self.inner.sensors.send_modify(SensorSet::mark_unavailable);
                PollOutcome::Unavailable { error }
            }
            Err(error) if error.is_authentication() => {
                error!(error = %error, "invalid authentication");
                PollOutcome::AuthenticationFailed { error }
            }
            Err(error) => {
                warn!(error = %error, "poll cycle aborted");
                PollOutcome::Aborted { error }
            }
        }
    }
}

impl<F: SnapshotFetcher + 'static> Poller<F> {
    /// Poll every `period` until `cancel` fires. The first cycle runs
    /// immediately; a slow cycle delays the next tick instead of bunching.
    pub fn spawn(&self, period: Duration, cancel: CancellationToken) -> JoinHandle<()> {
        let poller = self.clone();
        tokio::spawn(poll_task(poller, period.max(MIN_PERIOD), cancel))
    }
}

async fn poll_task<F: SnapshotFetcher>(
    poller: Poller<F>,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                poller.poll_once().await;
            }
        }
    }
    debug!("poll task stopped");
}
