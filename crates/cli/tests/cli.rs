use std::process::{Command, Output};

use serde_json::Value;

fn tapline(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tapline"))
        .args(args)
        .env("RUST_LOG", "info")
        .env_remove("TAPLINE_EMAIL")
        .env_remove("TAPLINE_COMPANY")
        .env_remove("TAPLINE_VARIANT")
        .env_remove("TAPLINE_REPEAT")
        .env_remove("TAPLINE_LOG_FORMAT")
        .output()
        .expect("failed to run tapline")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn default_run_logs_and_updates_most_recent_invoice() {
    let output = tapline(&[]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let err = stderr(&output);
    let line = err
        .lines()
        .find(|line| line.contains("Updating INV-5309"))
        .unwrap_or_else(|| panic!("no update line in {err}"));
    let timestamp = line.split_whitespace().next().unwrap();
    assert!(
        chrono::DateTime::parse_from_rfc3339(timestamp).is_ok(),
        "not an RFC 3339 timestamp: {line}"
    );
    assert!(line.contains(" INFO "), "no level in {line}");

    let json = stdout_json(&output);
    assert_eq!(json["variant"], "inline-tap");
    assert_eq!(json["status"], "applied");
    assert_eq!(json["updates"], 1);
    assert_eq!(json["invoice"]["number"], "INV-5309");
    assert_eq!(json["invoice"]["company_name"], "Yoyodyne Int'l");
}

#[test]
fn every_correct_variant_reaches_the_same_invoice_state() {
    for variant in ["plain-chain", "extracted-local", "inline-pipe", "inline-tap", "factored-tap"] {
        let output = tapline(&["--variant", variant, "--company", "Initrode"]);

        assert!(output.status.success(), "{variant}: {}", stderr(&output));
        let json = stdout_json(&output);
        assert_eq!(json["invoice"]["company_name"], "Initrode", "{variant}");
        assert_eq!(json["invoice"]["number"], "INV-5309", "{variant}");
    }
}

#[test]
fn buggy_pipe_exits_with_unsupported_capability() {
    let output = tapline(&["--variant", "inline-pipe-buggy"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let err = stderr(&output);
    assert!(err.contains("Updating INV-5309"), "{err}");
    assert!(err.contains("undefined capability `update` for status flag"), "{err}");
}

#[test]
fn repeat_performs_the_update_each_time() {
    let output = tapline(&["--repeat", "2"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stderr(&output).matches("Updating INV-5309").count(), 2);
    assert_eq!(stdout_json(&output)["updates"], 2);
}

#[test]
fn zero_repeat_is_rejected_at_parse_time() {
    let output = tapline(&["--repeat", "0"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("--repeat"));
}

#[test]
fn unknown_email_fails_with_not_found() {
    let output = tapline(&["--email", "nobody@example.com"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("not found: account for nobody@example.com"));
}

#[test]
fn list_prints_every_variant() {
    let output = tapline(&["--list"]);

    assert!(output.status.success());
    let listing = String::from_utf8_lossy(&output.stdout);
    for name in [
        "plain-chain",
        "extracted-local",
        "extracted-local-log-removed",
        "inline-pipe-buggy",
        "inline-pipe",
        "inline-tap",
        "factored-tap",
    ] {
        assert!(listing.contains(name), "missing {name}");
    }
}
