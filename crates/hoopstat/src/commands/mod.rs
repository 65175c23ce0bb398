//! Command handlers and the shared connection context.

pub mod auth;
pub mod config_cmd;
pub mod favorites;
pub mod players;
pub mod route;

use hoopstat_core::{Identity, Session};
use tracing::debug;

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;

/// Everything a backend-facing handler needs.
pub struct Context<'a> {
    pub global: &'a GlobalOpts,
    pub profile: String,
    pub session: Session,
}

/// Resolve the active profile and build a session with an empty jar.
pub fn connect(global: &GlobalOpts) -> Result<Context<'_>, CliError> {
    let cfg = config::load_config_or_default();
    let profile = config::active_profile_name(global, &cfg);
    let client_config = config::resolve_client_config(&cfg, &profile, global)?;
    debug!(profile = %profile, url = %client_config.api_url, "connecting");

    Ok(Context {
        global,
        profile,
        session: Session::from_config(&client_config)?,
    })
}

/// Adopt the session cookie stored for the active profile.
pub fn restore_session(ctx: &Context<'_>) -> Result<Identity, CliError> {
    let not_logged_in = || CliError::NotLoggedIn {
        profile: ctx.profile.clone(),
    };

    let cookie = hoopstat_config::load_session(&ctx.profile)?.ok_or_else(not_logged_in)?;
    ctx.session.restore(cookie).map_err(|err| {
        debug!(error = %err, "stored session unusable");
        not_logged_in()
    })
}
