// ── Snapshot fetcher ──
//
// The poller only needs "give me the current snapshot". `QbitFetcher` is
// the production implementation over the Web API; tests substitute their
// own.

use std::future::Future;

use tracing::{debug, info, warn};

use qbitsense_api::transport::{TlsMode, TransportConfig};
use qbitsense_api::QbitClient;

use crate::config::{ClientConfig, TlsVerification};
use crate::error::CoreError;
use crate::model::Snapshot;

/// Source of snapshots for the poll cycle.
///
/// Fails with [`CoreError::AuthenticationFailed`] when the session is
/// missing or expired, and with a connectivity error (see
/// [`CoreError::is_connectivity`]) when the client cannot be reached.
pub trait SnapshotFetcher: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<Snapshot, CoreError>> + Send;
}

/// Fetches full `sync/maindata` updates from a logged-in Web UI session.
pub struct QbitFetcher {
    client: QbitClient,
}

impl QbitFetcher {
    /// Build the HTTP client and log in once.
    ///
    /// Rejected credentials surface as [`CoreError::AuthenticationFailed`];
    /// an unreachable Web UI as a connectivity error the caller may retry.
    pub async fn connect(config: &ClientConfig) -> Result<Self, CoreError> {
        let transport = build_transport(config);
        let client = QbitClient::new(config.url.clone(), &transport)?;

        client
            .login(
                &config.credentials.username,
                &config.credentials.password,
            )
            .await
            .map_err(|e| match CoreError::from(e) {
                CoreError::Api { message, .. } | CoreError::InvalidResponse { message } => {
                    CoreError::ConnectionFailed {
                        url: config.url.to_string(),
                        reason: message,
                    }
                }
                other => other,
            })?;

        info!(url = %config.url, "logged in to qBittorrent");
        Ok(Self { client })
    }

    /// Wrap an already-authenticated client.
    pub fn from_client(client: QbitClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &QbitClient {
        &self.client
    }

    /// Application and Web API versions, e.g. `("v4.6.2", "2.9.3")`.
    pub async fn versions(&self) -> Result<(String, String), CoreError> {
        let (app, api) = tokio::join!(self.client.app_version(), self.client.api_version());
        Ok((app?, api?))
    }

    /// End the session. Failures are logged, never returned.
    pub async fn disconnect(&self) {
        if let Err(e) = self.client.logout().await {
            warn!(error = %e, "logout failed (non-fatal)");
        } else {
            debug!("logged out");
        }
    }
}

impl SnapshotFetcher for QbitFetcher {
    async fn fetch(&self) -> Result<Snapshot, CoreError> {
        let data = self.client.sync_main_data(0).await?;
        debug!(
            torrents = data.torrents.as_ref().map_or(0, std::collections::HashMap::len),
            "maindata received"
        );
        Snapshot::try_from(data)
    }
}

fn build_transport(config: &ClientConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
        cookie_jar: None, // QbitClient::new adds one automatically
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
