//! CLI configuration: thin wrapper around `hoopstat_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--api-url, --insecure, --timeout).

use std::time::Duration;

use hoopstat_core::{ClientConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use hoopstat_config::{Config, Profile, config_path, load_config_or_default, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Translate the active profile + global flags into a `ClientConfig`.
///
/// A missing profile falls back to the defaults (local backend), so the CLI
/// works before `config init` has run.
pub fn resolve_client_config(
    config: &Config,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<ClientConfig, CliError> {
    let profile = config.profiles.get(profile_name).cloned().unwrap_or_default();
    let mut client = hoopstat_config::profile_to_client_config(&profile, config)?;

    if let Some(ref url_str) = global.api_url {
        client.api_url = url_str.parse().map_err(|_| CliError::Validation {
            field: "api-url".into(),
            reason: format!("invalid URL: {url_str}"),
        })?;
    }
    if global.insecure {
        client.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        client.timeout = Duration::from_secs(secs);
    }

    Ok(client)
}
