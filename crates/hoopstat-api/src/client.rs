// REST API HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, bearer-token injection from
// the shared `TokenJar`, and status-code mapping. Endpoint groups (players,
// favorites, account) are inherent methods in separate files so this module
// stays focused on transport mechanics.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::TokenJar;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Longest slice of an error body carried into error messages.
const MAX_ERROR_BODY: usize = 512;

/// HTTP client for the hoopstat backend.
///
/// Every request carries `Authorization: Bearer <token>` when the shared
/// jar holds an unexpired session cookie. The jar is read-only here; only
/// the session layer writes it.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<TokenJar>,
}

impl ApiClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the backend root (e.g. `http://localhost:8000`); a path
    /// prefix such as `https://host/api` is preserved.
    pub fn new(
        base_url: Url,
        session: Arc<TokenJar>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, session))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, session: Arc<TokenJar>) -> Self {
        Self {
            http,
            base_url,
            session,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The token jar this client reads bearer tokens from.
    pub fn session(&self) -> &Arc<TokenJar> {
        &self.session
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/{path}`, keeping any path prefix on the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, Error> {
        let full = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&full)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let req = self.http.request(method, url);
        match self.session.token() {
            Some(token) => req.bearer_auth(token.expose_secret()),
            None => req,
        }
    }

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.request(Method::GET, url).send().await?;
        Self::decode(resp).await
    }

    /// Send a POST request with a JSON body and decode the JSON response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let resp = self.request(Method::POST, url).json(body).send().await?;
        Self::decode(resp).await
    }

    /// Send a body-less request whose response body is irrelevant.
    pub(crate) async fn send_empty(&self, method: Method, url: Url) -> Result<(), Error> {
        debug!("{} {}", method, url);
        let resp = self.request(method, url).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    // ── Response handling ────────────────────────────────────────────

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, Error> {
        let resp = Self::check(resp).await?;
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    /// Map non-success statuses onto error variants.
    async fn check(resp: Response) -> Result<Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = error_message(status, &body);

        Err(match status {
            StatusCode::UNAUTHORIZED => Error::Unauthorized { message },
            StatusCode::FORBIDDEN => Error::Forbidden { message },
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => {
                Error::Validation {
                    status: status.as_u16(),
                    message,
                }
            }
            _ => Error::Api {
                status: status.as_u16(),
                message,
            },
        })
    }
}

/// Pull a human-readable message out of an error body.
///
/// The backend reports `{"detail": "..."}` (or a list of validation
/// entries under `detail`); anything else is passed through truncated.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        match value.get("detail") {
            Some(serde_json::Value::String(detail)) => return detail.clone(),
            Some(detail @ serde_json::Value::Array(_)) => return detail.to_string(),
            _ => {}
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_owned();
    }
    trimmed.chars().take(MAX_ERROR_BODY).collect()
}
