use thiserror::Error;

/// Top-level error type for the `hoopstat-api` crate.
///
/// Covers every failure mode of the REST surface: authentication,
/// transport, HTTP status rejections, and payload decoding.
/// `hoopstat-core` maps these into its own error kinds.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login or signup rejected (wrong credentials, duplicate username, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Missing or invalid bearer token on a protected call (HTTP 401).
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Token is valid but lacks the entitlement for this call (HTTP 403).
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    // ── Request validation ──────────────────────────────────────────
    /// The backend rejected the request target or body (HTTP 400/404/422).
    #[error("Request rejected (HTTP {status}): {message}")]
    Validation { status: u16, message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Backend ─────────────────────────────────────────────────────
    /// Any other non-success response.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the bearer token is missing, expired, or rejected.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::Authentication { .. } | Self::Unauthorized { .. } | Self::Forbidden { .. }
        )
    }

    /// Returns `true` if the request never completed (no HTTP response).
    pub fn is_network(&self) -> bool {
        match self {
            Self::Transport(e) => e.status().is_none(),
            _ => false,
        }
    }

    /// The HTTP status that produced this error, if there was a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::Validation { status, .. } | Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
