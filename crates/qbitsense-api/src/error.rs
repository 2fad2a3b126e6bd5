use thiserror::Error;

/// Errors from talking to the qBittorrent Web API.
///
/// `qbitsense-core` folds these into connectivity and authentication
/// failures.
#[derive(Debug, Error)]
pub enum Error {
    // ── Session ─────────────────────────────────────────────────────
    /// `auth/login` refused us: bad credentials, or the client IP is banned.
    #[error("Web UI login refused: {message}")]
    Authentication { message: String },

    /// The Web API answered 403: no session cookie, or it expired.
    #[error("no valid SID cookie; log in first")]
    LoginRequired,

    // ── Transport ───────────────────────────────────────────────────
    /// The Web UI could not be reached.
    #[error("could not reach the Web UI: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("bad Web UI URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// `timeout_secs` is `None` when the client was built outside a
    /// [`TransportConfig`](crate::TransportConfig).
    #[error(
        "Web UI did not answer{}",
        .timeout_secs.map_or_else(String::new, |s| format!(" within {s}s"))
    )]
    Timeout { timeout_secs: Option<u64> },

    /// CA certificate loading or client construction failed.
    #[error("TLS setup failed: {0}")]
    Tls(String),

    // ── Web API ─────────────────────────────────────────────────────
    #[error("Web API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// The body was not the JSON we expected. `body` keeps the raw text.
    #[error("undecodable Web API response: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Logging in again could fix this.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::LoginRequired)
    }

    /// The next poll cycle may succeed without any change on our side.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
