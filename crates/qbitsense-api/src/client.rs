// qBittorrent Web API HTTP client
//
// Wraps `reqwest::Client` with `/api/v2/` URL construction, cookie-session
// login, and status-code mapping. The Web API answers 403 for every call
// made without a valid SID cookie, which is surfaced as `Error::LoginRequired`.

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::MainData;
use crate::transport::TransportConfig;

/// Body the login endpoint returns on success.
const LOGIN_OK: &str = "Ok.";

/// Raw HTTP client for the qBittorrent Web API.
///
/// Holds the session cookie in its jar after [`login`](Self::login);
/// every subsequent request carries it automatically.
pub struct QbitClient {
    http: reqwest::Client,
    base_url: Url,
    timeout_secs: Option<u64>,
}

impl QbitClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// If the config doesn't already include a cookie jar, one is created
    /// automatically (session auth requires cookies). The `base_url` is the
    /// Web UI root, e.g. `http://192.168.1.10:8080` or a reverse-proxy path
    /// such as `https://nas.lan/qbittorrent/`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url,
            timeout_secs: Some(config.timeout_secs()),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// Use this when you already have a client with a session cookie in its
    /// jar, or in tests against a mock server. The client's own timeout is
    /// not visible here, so [`Error::Timeout`] carries no duration.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            timeout_secs: None,
        }
    }

    /// The Web UI base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for a Web API path: `{base}/api/v2/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/api/v2/{path}");
        Ok(Url::parse(&full)?)
    }

    // ── Authentication ───────────────────────────────────────────────

    /// Authenticate with username/password.
    ///
    /// `POST /api/v2/auth/login` (form-encoded). The Web UI rejects
    /// requests whose `Referer` doesn't match its host, so the base URL
    /// is sent as the referer. On success the `SID` cookie lands in the
    /// client's jar.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.api_url("auth/login")?;
        debug!("logging in at {}", url);

        let resp = self
            .http
            .post(url)
            .header(reqwest::header::REFERER, self.base_url.as_str())
            .form(&[("username", username), ("password", password.expose_secret())])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::Authentication {
                message: "client IP banned after too many failed login attempts".into(),
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: preview(&body),
            });
        }

        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        if body.trim() != LOGIN_OK {
            return Err(Error::Authentication {
                message: format!("login rejected: {}", preview(&body)),
            });
        }

        debug!("login successful");
        Ok(())
    }

    /// End the current session.
    ///
    /// `POST /api/v2/auth/logout`
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.api_url("auth/logout")?;
        debug!("logging out at {}", url);

        let resp = self
            .http
            .post(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        check_status(&resp)?;

        debug!("logout complete");
        Ok(())
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Fetch the sync state.
    ///
    /// `GET /api/v2/sync/maindata?rid={rid}`. Pass `rid = 0` for a full
    /// update containing every torrent and the complete `server_state`.
    pub async fn sync_main_data(&self, rid: i64) -> Result<MainData, Error> {
        let mut url = self.api_url("sync/maindata")?;
        url.query_pairs_mut().append_pair("rid", &rid.to_string());
        self.get_json(url).await
    }

    /// qBittorrent application version, e.g. `v4.6.2`.
    ///
    /// `GET /api/v2/app/version`
    pub async fn app_version(&self) -> Result<String, Error> {
        let url = self.api_url("app/version")?;
        self.get_text(url).await
    }

    /// Web API version, e.g. `2.9.3`.
    ///
    /// `GET /api/v2/app/webapiVersion`
    pub async fn api_version(&self) -> Result<String, Error> {
        let url = self.api_url("app/webapiVersion")?;
        self.get_text(url).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    async fn get(&self, url: Url) -> Result<reqwest::Response, Error> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        check_status(&resp)?;
        Ok(resp)
    }

    /// Send a GET request and return the trimmed plain-text body.
    async fn get_text(&self, url: Url) -> Result<String, Error> {
        let resp = self.get(url).await?;
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        Ok(body.trim().to_owned())
    }

    /// Send a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let resp = self.get(url).await?;
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }
}

/// Map 403 to `LoginRequired` and any other non-success status to `Error::Api`.
fn check_status(resp: &reqwest::Response) -> Result<(), Error> {
    let status = resp.status();
    if status == reqwest::StatusCode::FORBIDDEN {
        return Err(Error::LoginRequired);
    }
    if !status.is_success() {
        return Err(Error::Api {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_owned(),
        });
    }
    Ok(())
}

fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}
