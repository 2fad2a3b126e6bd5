// ── Runtime connection configuration ──
//
// These types describe *how* to reach a qBittorrent Web UI and how the
// resulting sensors are named. They carry credential data and connection
// tuning, but never touch disk. The CLI constructs a `ClientConfig` and
// hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Instance name used when none is configured.
pub const DEFAULT_NAME: &str = "qBittorrent";

/// Default time between poll cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Web UI login credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed Web UI certificates).
    DangerAcceptInvalid,
}

/// How one configured client is identified in sensor ids and names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceIdentity {
    /// Stable id, prefix of every sensor `unique_id`.
    pub id: String,
    /// Human-facing name, prefix of every sensor display name.
    pub name: String,
}

impl Default for InstanceIdentity {
    fn default() -> Self {
        Self {
            id: "default".into(),
            name: DEFAULT_NAME.into(),
        }
    }
}

/// Configuration for polling a single qBittorrent instance.
///
/// Built by the CLI, passed to `QbitFetcher` and `Poller`; core never
/// reads config files.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Web UI URL (e.g., `http://192.168.1.10:8080`).
    pub url: Url,
    /// Login credentials.
    pub credentials: Credentials,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// Time between poll cycles.
    pub poll_interval: Duration,
    /// Sensor naming.
    pub identity: InstanceIdentity,
}

impl ClientConfig {
    pub fn new(url: Url, credentials: Credentials) -> Self {
        Self {
            url,
            credentials,
            tls: TlsVerification::default(),
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            identity: InstanceIdentity::default(),
        }
    }
}
