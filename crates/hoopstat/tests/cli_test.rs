//! Integration tests for the `hoopstat` CLI binary.
//!
//! These cover argument parsing, completions, configuration and the
//! offline route check, all without a live backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// `{"sub":"kd35","role":"free"}`
const FREE_TOKEN: &str =
    "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiJrZDM1Iiwicm9sZSI6ImZyZWUifQ.sig";

/// `{"sub":"root","role":"admin"}`
const ADMIN_TOKEN: &str =
    "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiJyb290Iiwicm9sZSI6ImFkbWluIn0.sig";

/// Build a [`Command`] for the `hoopstat` binary with env isolation.
///
/// Clears all `HOOPSTAT_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn hoopstat_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("hoopstat");
    cmd.env("HOME", "/tmp/hoopstat-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/hoopstat-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("HOOPSTAT_PROFILE")
        .env_remove("HOOPSTAT_API_URL")
        .env_remove("HOOPSTAT_OUTPUT")
        .env_remove("HOOPSTAT_INSECURE")
        .env_remove("HOOPSTAT_TIMEOUT")
        .env_remove("HOOPSTAT_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = hoopstat_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_lists_commands() {
    hoopstat_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("players")
            .and(predicate::str::contains("favorites"))
            .and(predicate::str::contains("route"))
            .and(predicate::str::contains("login")),
    );
}

#[test]
fn test_version_flag() {
    hoopstat_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hoopstat"));
}

#[test]
fn test_completions_zsh() {
    hoopstat_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Argument validation ─────────────────────────────────────────────

#[test]
fn test_unknown_favorite_kind_is_usage_error() {
    let output = hoopstat_cmd()
        .args(["favorites", "add", "coach", "12"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("coach"));
}

#[test]
fn test_pages_conflicts_with_all() {
    hoopstat_cmd()
        .args(["players", "--pages", "2", "--all"])
        .assert()
        .failure()
        .code(2);
}

// ── Route gate ──────────────────────────────────────────────────────

#[test]
fn test_route_public_path_is_allowed() {
    hoopstat_cmd()
        .args(["--output", "plain", "route", "/pricing"])
        .assert()
        .success()
        .stdout("allow\n");
}

#[test]
fn test_route_protected_without_token_redirects_to_login() {
    hoopstat_cmd()
        .args(["--output", "plain", "route", "/players/201939"])
        .assert()
        .success()
        .stdout("/login?redirect=%2Fplayers%2F201939\n");
}

#[test]
fn test_route_admin_with_free_token_redirects_home() {
    hoopstat_cmd()
        .args(["--output", "plain", "route", "/admin", "--token", FREE_TOKEN])
        .assert()
        .success()
        .stdout("/\n");
}

#[test]
fn test_route_admin_with_garbage_token_redirects_to_login() {
    hoopstat_cmd()
        .args(["--output", "plain", "route", "/admin", "--token", "a.b@d.c"])
        .assert()
        .success()
        .stdout("/login?redirect=%2Fadmin\n");
}

#[test]
fn test_route_json_includes_identity() {
    hoopstat_cmd()
        .args(["--output", "json-compact", "route", "/admin/users", "--token", ADMIN_TOKEN])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""decision":"allow""#)
                .and(predicate::str::contains(r#""subject":"root""#))
                .and(predicate::str::contains(r#""role":"admin""#)),
        );
}

#[test]
fn test_route_table_output_describes_redirect() {
    hoopstat_cmd()
        .args(["route", "/favorites?tab=teams"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("redirect")
                .and(predicate::str::contains("/login?redirect=%2Ffavorites%3Ftab%3Dteams")),
        );
}

#[test]
fn test_route_uses_configured_table() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join("hoopstat");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[routes]\nprotected = [\"/vault\"]\nlogin_path = \"/signin\"\n",
    )
    .unwrap();

    hoopstat_cmd()
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["--output", "plain", "route", "/vault"])
        .assert()
        .success()
        .stdout("/signin?redirect=%2Fvault\n");
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_without_file_renders_defaults() {
    hoopstat_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[routes]"));
}

#[test]
fn test_config_path_points_at_config_toml() {
    hoopstat_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Backend errors ──────────────────────────────────────────────────

#[test]
fn test_players_against_unreachable_backend_exits_with_connection_code() {
    let output = hoopstat_cmd()
        .args(["--api-url", "http://127.0.0.1:1", "players"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7));
    assert!(combined_output(&output).contains("Could not reach the backend"));
}
