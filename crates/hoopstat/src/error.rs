//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use hoopstat_config::ConfigError;
use hoopstat_core::CoreError;

/// Exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the backend")]
    #[diagnostic(
        code(hoopstat::connection_failed),
        help(
            "Check that the backend is running and the URL is right.\n\
             Reason: {reason}\n\
             Try: hoopstat --api-url http://localhost:8000 players"
        )
    )]
    ConnectionFailed { reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(hoopstat::auth_failed),
        help("Check your username and password, then run: hoopstat login")
    )]
    AuthFailed { message: String },

    #[error("Not logged in for profile '{profile}'")]
    #[diagnostic(
        code(hoopstat::not_logged_in),
        help("Run: hoopstat login --profile {profile}")
    )]
    NotLoggedIn { profile: String },

    #[error("Not permitted: {message}")]
    #[diagnostic(
        code(hoopstat::unauthorized),
        help("The stored session may have expired. Run: hoopstat login")
    )]
    Unauthorized { message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(hoopstat::api_error), help("HTTP status: {status:?}"))]
    ApiError { status: Option<u16>, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(hoopstat::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(hoopstat::config),
        help("Inspect the configuration with: hoopstat config show")
    )]
    Config(#[from] ConfigError),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NotLoggedIn { .. } => exit_code::AUTH,
            Self::Unauthorized { .. } => exit_code::PERMISSION,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        Self::from(&err)
    }
}

/// Loader errors arrive shared (`Arc<CoreError>`), so map by reference.
impl From<&CoreError> for CliError {
    fn from(err: &CoreError) -> Self {
        match err {
            CoreError::NetworkFailure { reason } => CliError::ConnectionFailed {
                reason: reason.clone(),
            },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed {
                message: message.clone(),
            },

            CoreError::Unauthorized { message } => CliError::Unauthorized {
                message: message.clone(),
            },

            CoreError::DecodeFailure { reason } => CliError::AuthFailed {
                message: format!("backend issued an unreadable token ({reason})"),
            },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message.clone(),
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message.clone(),
            },

            CoreError::Api { message, status } => CliError::ApiError {
                status: *status,
                message: message.clone(),
            },

            CoreError::Disposed | CoreError::Internal(_) => CliError::ApiError {
                status: None,
                message: err.to_string(),
            },
        }
    }
}
