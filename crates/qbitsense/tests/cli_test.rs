//! Integration tests for the `qbitsense` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! the offline sensor catalogue and error handling, plus one end-to-end
//! poll against a mock Web UI.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

const ISOLATED_HOME: &str = "/tmp/qbitsense-cli-test-nonexistent";

/// Build a [`Command`] for the `qbitsense` binary with env isolation.
///
/// Clears all `QBITSENSE_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn qbitsense_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("qbitsense");
    cmd.env("HOME", ISOLATED_HOME)
        .env("XDG_CONFIG_HOME", ISOLATED_HOME)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("QBITSENSE_PROFILE")
        .env_remove("QBITSENSE_URL")
        .env_remove("QBITSENSE_USERNAME")
        .env_remove("QBITSENSE_PASSWORD")
        .env_remove("QBITSENSE_OUTPUT")
        .env_remove("QBITSENSE_INSECURE")
        .env_remove("QBITSENSE_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = qbitsense_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    qbitsense_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("qBittorrent")
            .and(predicate::str::contains("poll"))
            .and(predicate::str::contains("watch"))
            .and(predicate::str::contains("sensors")),
    );
}

#[test]
fn test_version_flag() {
    qbitsense_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("qbitsense"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    qbitsense_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    qbitsense_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Sensor catalogue (offline) ──────────────────────────────────────

#[test]
fn test_sensors_table() {
    qbitsense_cmd().arg("sensors").assert().success().stdout(
        predicate::str::contains("download_speed")
            .and(predicate::str::contains("Down Speed"))
            .and(predicate::str::contains("KiB/s"))
            .and(predicate::str::contains("Highest ETA")),
    );
}

#[test]
fn test_sensors_plain_lists_keys_in_order() {
    let output = qbitsense_cmd()
        .args(["--output", "plain", "sensors"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let keys: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        keys,
        vec![
            "current_status",
            "download_speed",
            "upload_speed",
            "number_total",
            "highest_eta",
            "number_downloading",
            "number_seeding",
            "number_paused",
            "download_percent",
        ]
    );
}

#[test]
fn test_sensors_json() {
    let output = qbitsense_cmd()
        .args(["-o", "json", "sensors"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let list = parsed.as_array().unwrap();
    assert_eq!(list.len(), 9);
    assert_eq!(list[1]["unit"], "KiB/s");
    assert_eq!(list[1]["device_class"], "data_rate");
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    // A missing config file renders the defaults.
    qbitsense_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_profile"));
}

#[test]
fn test_config_path() {
    qbitsense_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_subcommands_exist() {
    qbitsense_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("init")
                .and(predicate::str::contains("show"))
                .and(predicate::str::contains("profiles"))
                .and(predicate::str::contains("set-password")),
        );
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = qbitsense_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_invalid_output_format() {
    let output = qbitsense_cmd()
        .args(["--output", "invalid", "sensors"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_invalid_watch_interval() {
    qbitsense_cmd()
        .args(["watch", "--interval", "soon"])
        .assert()
        .code(2);
}

#[test]
fn test_poll_no_config() {
    qbitsense_cmd()
        .arg("poll")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("config init"));
}

#[test]
fn test_poll_unknown_profile() {
    qbitsense_cmd()
        .args(["--profile", "seedbox", "poll"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("seedbox"));
}

#[test]
fn test_poll_without_username() {
    qbitsense_cmd()
        .args(["--url", "http://127.0.0.1:1", "poll"])
        .assert()
        .code(3);
}

#[test]
fn test_poll_rejects_non_http_url() {
    qbitsense_cmd()
        .args(["--url", "ftp://nas.lan", "--username", "admin", "poll"])
        .env("QBITSENSE_PASSWORD", "adminadmin")
        .assert()
        .code(2);
}

#[test]
fn test_poll_unreachable() {
    qbitsense_cmd()
        .args(["--url", "http://127.0.0.1:1", "--username", "admin", "poll"])
        .env("QBITSENSE_PASSWORD", "adminadmin")
        .assert()
        .code(7);
}

#[test]
fn test_poll_unknown_sensor() {
    qbitsense_cmd()
        .args([
            "--url",
            "http://127.0.0.1:1",
            "--username",
            "admin",
            "poll",
            "--sensor",
            "bogus",
        ])
        .env("QBITSENSE_PASSWORD", "adminadmin")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("bogus"));
}

// ── End to end ──────────────────────────────────────────────────────

async fn mock_web_ui(login_body: &str) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "SID=abc123; HttpOnly; path=/")
                .set_body_string(login_body),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/sync/maindata"))
        .and(query_param("rid", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rid": 1,
            "full_update": true,
            "torrents": {
                "aaa": { "state": "downloading", "size": 1000, "downloaded": 750, "eta": 900 },
                "bbb": { "state": "stalledUP", "size": 10, "downloaded": 10, "eta": 0 },
                "ccc": { "state": "pausedDL", "size": 0, "downloaded": 0, "eta": 0 }
            },
            "server_state": { "dl_info_speed": 51, "up_info_speed": 0 }
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v2/auth/logout"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    server
}

async fn run_blocking(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_poll_end_to_end_plain() {
    let server = mock_web_ui("Ok.").await;

    let mut cmd = qbitsense_cmd();
    cmd.args(["--url", &server.uri(), "--username", "admin", "-o", "plain", "poll"])
        .env("QBITSENSE_PASSWORD", "adminadmin");
    let output = run_blocking(cmd).await;

    let text = combined_output(&output);
    assert!(output.status.success(), "poll failed:\n{text}");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("current_status=downloading"), "{stdout}");
    assert!(stdout.contains("download_speed=0.05"), "{stdout}");
    assert!(stdout.contains("number_total=3"), "{stdout}");
    assert!(stdout.contains("number_downloading=1"), "{stdout}");
    assert!(stdout.contains("number_seeding=1"), "{stdout}");
    assert!(stdout.contains("number_paused=1"), "{stdout}");
    assert!(stdout.contains("download_percent=75.0\n"), "{stdout}");
    assert!(stdout.contains("highest_eta=15.0\n"), "{stdout}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_poll_end_to_end_selected_sensor_json() {
    let server = mock_web_ui("Ok.").await;

    let mut cmd = qbitsense_cmd();
    cmd.args([
        "--url",
        &server.uri(),
        "--username",
        "admin",
        "-o",
        "json-compact",
        "poll",
        "-s",
        "download_percent",
    ])
    .env("QBITSENSE_PASSWORD", "adminadmin");
    let output = run_blocking(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
    assert_eq!(parsed[0]["key"], "download_percent");
    assert_eq!(parsed[0]["value"], 75.0);
    assert_eq!(parsed[0]["available"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_poll_wrong_password() {
    let server = mock_web_ui("Fails.").await;

    let mut cmd = qbitsense_cmd();
    cmd.args(["--url", &server.uri(), "--username", "admin", "poll"])
        .env("QBITSENSE_PASSWORD", "wrong");
    let output = run_blocking(cmd).await;

    assert_eq!(output.status.code(), Some(3), "{}", combined_output(&output));
}
