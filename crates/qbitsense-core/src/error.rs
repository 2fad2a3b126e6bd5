// ── Core error types ──
//
// User-facing errors from qbitsense-core. Consumers never see HTTP status
// codes or JSON parse failures directly. The `From<qbitsense_api::Error>`
// impl sorts transport-layer errors into connectivity vs. authentication,
// which is the only distinction the poll cycle acts on.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to qBittorrent at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error(
        "Request to qBittorrent timed out{}",
        .timeout_secs.map_or_else(String::new, |s| format!(" after {s}s"))
    )]
    Timeout { timeout_secs: Option<u64> },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("Web API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Unreadable response from qBittorrent: {message}")]
    InvalidResponse { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Malformed snapshot: {reason}")]
    MalformedSnapshot { reason: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Transport-level failure: the client could not be reached or
    /// answered with something other than a usable response.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. }
                | Self::Timeout { .. }
                | Self::Api { .. }
                | Self::InvalidResponse { .. }
        )
    }

    /// The session is missing, expired, or the credentials were rejected.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::AuthenticationFailed { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<qbitsense_api::Error> for CoreError {
    fn from(err: qbitsense_api::Error) -> Self {
        match err {
            qbitsense_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            qbitsense_api::Error::LoginRequired => CoreError::AuthenticationFailed {
                message: "Web API answered 403; the session is missing or expired".into(),
            },
            qbitsense_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: None }
                } else {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                }
            }
            qbitsense_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("bad Web UI URL: {e}"),
            },
            qbitsense_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            qbitsense_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS setup failed: {msg}"),
            },
            qbitsense_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            qbitsense_api::Error::Deserialization { message, body: _ } => {
                CoreError::InvalidResponse { message }
            }
        }
    }
}
