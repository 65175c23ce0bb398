// ── Core error types ──
//
// User-facing errors from hoopstat-core. Consumers never see HTTP status
// codes or JSON parse failures directly: `From<hoopstat_api::Error>`
// folds transport-layer errors into the handful of kinds the favorites
// store, the pager, and the session layer report.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Transport ────────────────────────────────────────────────────
    /// The request did not complete (connection refused, DNS, timeout).
    #[error("Network failure: {reason}")]
    NetworkFailure { reason: String },

    // ── Auth ─────────────────────────────────────────────────────────
    /// Missing or invalid token on a protected call.
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Login or signup was rejected.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// Token payload could not be decoded into an identity.
    #[error("Cannot decode token: {reason}")]
    DecodeFailure { reason: String },

    // ── Operation errors ─────────────────────────────────────────────
    /// Malformed mutation target (non-positive id, unknown entity).
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    /// The owning store or loader was disposed before the call ran.
    #[error("Store disposed")]
    Disposed,

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` if re-authenticating could resolve the error.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. } | Self::AuthenticationFailed { .. } | Self::DecodeFailure { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<hoopstat_api::Error> for CoreError {
    fn from(err: hoopstat_api::Error) -> Self {
        match err {
            hoopstat_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            hoopstat_api::Error::Unauthorized { message }
            | hoopstat_api::Error::Forbidden { message } => CoreError::Unauthorized { message },
            hoopstat_api::Error::Validation { message, .. } => {
                CoreError::ValidationFailed { message }
            }
            hoopstat_api::Error::Transport(ref e) => match e.status() {
                None => CoreError::NetworkFailure {
                    reason: e.to_string(),
                },
                Some(status) => CoreError::Api {
                    message: e.to_string(),
                    status: Some(status.as_u16()),
                },
            },
            hoopstat_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            hoopstat_api::Error::Tls(reason) => CoreError::NetworkFailure {
                reason: format!("TLS error: {reason}"),
            },
            hoopstat_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            hoopstat_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
