//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line. The
//! domain labels (roles, favorite markers, gate decisions) live here too so
//! every command paints them the same way.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use hoopstat_core::{GateDecision, Role};

use crate::cli::{ColorMode, OutputFormat};

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Domain labels ───────────────────────────────────────────────────

/// Role name, colored by tier.
pub fn role_label(role: Role, color: bool) -> String {
    if !color {
        return role.to_string();
    }
    match role {
        Role::Admin => role.red().to_string(),
        Role::Ultimate => role.magenta().to_string(),
        Role::Premium => role.yellow().to_string(),
        Role::Free => role.dimmed().to_string(),
    }
}

/// Table cell for favorite membership.
pub fn favorite_marker(favorited: bool) -> &'static str {
    if favorited { "★" } else { "" }
}

/// Human-readable gate outcome for table output.
pub fn gate_decision(decision: &GateDecision, color: bool) -> String {
    let verdict = |allowed: bool| match (color, allowed) {
        (false, true) => "allow".to_owned(),
        (false, false) => "redirect".to_owned(),
        (true, true) => "allow".green().to_string(),
        (true, false) => "redirect".yellow().to_string(),
    };

    match decision {
        GateDecision::Allow { identity: None } => verdict(true),
        GateDecision::Allow {
            identity: Some(identity),
        } => format!(
            "{} as {} ({})",
            verdict(true),
            identity.subject,
            role_label(identity.role, color)
        ),
        GateDecision::RedirectToLogin {
            location,
            return_to,
        } => format!("{} → {location}\nreturns to {return_to} after login", verdict(false)),
        GateDecision::RedirectHome { location } => format!("{} → {location}", verdict(false)),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a single serde-serializable item in the chosen format.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => id_fn(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.unwrap_or_else(|e| format!("{{\"error\":\"serialization failed: {e}\"}}"))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("error: serialization failed: {e}"))
}
