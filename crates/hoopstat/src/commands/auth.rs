//! Login, signup, logout, whoami.

use chrono::{DateTime, Utc};
use dialoguer::Input;
use secrecy::SecretString;
use serde::Serialize;

use hoopstat_core::{Identity, Role};

use crate::cli::{LoginArgs, SignupArgs};
use crate::error::CliError;
use crate::output;

use super::{Context, restore_session};

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn resolve_password(flag: Option<String>) -> Result<SecretString, CliError> {
    let pass = match flag {
        Some(p) => p,
        None => rpassword::prompt_password("Password: ").map_err(prompt_err)?,
    };
    if pass.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(SecretString::from(pass))
}

/// Persist the freshly issued cookie for the active profile.
fn remember(ctx: &Context<'_>) -> Result<(), CliError> {
    if let Some(cookie) = ctx.session.jar().cookie() {
        hoopstat_config::save_session(&ctx.profile, &cookie)?;
    }
    Ok(())
}

fn print_identity(ctx: &Context<'_>, identity: &Identity, verb: &str) {
    let color = output::should_color(&ctx.global.color);
    let out = output::render_single(
        &ctx.global.output,
        identity,
        |i| format!("{verb} {} ({})", i.subject, output::role_label(i.role, color)),
        |i| i.subject.clone(),
    );
    output::print_output(&out, ctx.global.quiet);
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn login(args: LoginArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let username = match args.username {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(prompt_err)?,
    };
    let password = resolve_password(args.password)?;

    let identity = ctx.session.login(&username, &password).await?;
    remember(ctx)?;
    print_identity(ctx, &identity, "Logged in as");
    Ok(())
}

pub async fn signup(args: SignupArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let password = resolve_password(args.password)?;

    let identity = ctx
        .session
        .signup(&args.username, &args.email, &password)
        .await?;
    remember(ctx)?;
    print_identity(ctx, &identity, "Signed up as");
    Ok(())
}

pub fn logout(ctx: &Context<'_>) -> Result<(), CliError> {
    ctx.session.logout();
    hoopstat_config::clear_session(&ctx.profile)?;
    if !ctx.global.quiet {
        eprintln!("Logged out of profile '{}'", ctx.profile);
    }
    Ok(())
}

#[derive(Serialize)]
struct Whoami {
    profile: String,
    subject: String,
    role: Role,
    expires_at: Option<DateTime<Utc>>,
}

pub fn whoami(ctx: &Context<'_>) -> Result<(), CliError> {
    let identity = restore_session(ctx)?;
    let view = Whoami {
        profile: ctx.profile.clone(),
        subject: identity.subject,
        role: identity.role,
        expires_at: ctx.session.jar().cookie().map(|c| c.expires_at()),
    };

    let color = output::should_color(&ctx.global.color);
    let out = output::render_single(
        &ctx.global.output,
        &view,
        |v| {
            let expires = v
                .expires_at
                .map_or_else(|| "-".into(), |t| t.format("%Y-%m-%d %H:%M UTC").to_string());
            format!(
                "Profile:  {}\nUser:     {}\nRole:     {}\nExpires:  {expires}",
                v.profile,
                v.subject,
                output::role_label(v.role, color)
            )
        },
        |v| v.subject.clone(),
    );
    output::print_output(&out, ctx.global.quiet);
    Ok(())
}
