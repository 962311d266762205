// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI integration tests.
//!
//! These tests run the actual feedcodec binary and verify its behavior.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Get the path to the built feedcodec binary
fn feedcodec_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_feedcodec"))
}

/// Run feedcodec with arguments and optional stdin
fn run_with_stdin(args: &[&str], stdin: &[u8]) -> Output {
    let bin = feedcodec_bin();
    let mut child = Command::new(&bin)
        .args(args)
        .env_remove("FEEDCODEC_SCHEMA")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap_or_else(|_| panic!("Failed to run {:?}", bin));
    if let Some(mut pipe) = child.stdin.take() {
        pipe.write_all(stdin).expect("write stdin");
    }
    child.wait_with_output().expect("wait for feedcodec")
}

/// Run feedcodec with arguments
fn run(args: &[&str]) -> Output {
    run_with_stdin(args, &[])
}

/// Run feedcodec and assert success
fn run_ok(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "Command failed: {:?}\nstdout: {}\nstderr: {}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run feedcodec and assert failure
fn run_err(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        !output.status.success(),
        "Command should have failed: {:?}\nstdout: {}",
        args,
        String::from_utf8_lossy(&output.stdout)
    );
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn write_file(dir: &Path, name: &str, contents: &[u8]) -> String {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path.to_string_lossy().into_owned()
}

const ID_SCHEMA: &str = "name = \"Root\"\n[fields.1]\nname = \"id\"\n";

// ============================================================================
// Help and Version
// ============================================================================

#[test]
fn test_help() {
    let stdout = run_ok(&["--help"]);
    assert!(stdout.contains("decode"));
    assert!(stdout.contains("schema"));
}

#[test]
fn test_version() {
    let stdout = run_ok(&["--version"]);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Decode
// ============================================================================

#[test]
fn test_decode_file_with_schema() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_file(dir.path(), "schema.toml", ID_SCHEMA.as_bytes());
    let feed = write_file(dir.path(), "feed.pb", &[0x0A, 0x03, b'a', b'b', b'c']);

    let stdout = run_ok(&["decode", &feed, "--schema", &schema]);
    assert_eq!(stdout.trim(), r#"{"id":"abc"}"#);
}

#[test]
fn test_decode_hex_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_file(dir.path(), "schema.toml", ID_SCHEMA.as_bytes());

    let output = run_with_stdin(&["decode", "--hex", "--schema", &schema], b"0a 03 61 62 63\n");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        r#"{"id":"abc"}"#
    );
}

#[test]
fn test_decode_builtin_schema() {
    let dir = tempfile::tempdir().unwrap();
    // header { gtfs_realtime_version: "2.0" }
    let feed = write_file(
        dir.path(),
        "feed.pb",
        &[0x0A, 0x05, 0x0A, 0x03, b'2', b'.', b'0'],
    );

    let stdout = run_ok(&["decode", &feed]);
    assert_eq!(
        stdout.trim(),
        r#"{"header":{"gtfs_realtime_version":"2.0"}}"#
    );
}

#[test]
fn test_decode_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    // field 9 is not in the built-in schema
    let feed = write_file(dir.path(), "feed.pb", &[0x48, 0x96, 0x01]);
    let out = dir.path().join("out.json");

    let stdout = run_ok(&["decode", &feed, "--output", &out.to_string_lossy()]);
    assert!(stdout.is_empty());
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["9"], 150);
}

#[test]
fn test_decode_precision_flags() {
    let dir = tempfile::tempdir().unwrap();
    let mut data = vec![0x4D];
    data.extend_from_slice(&1.234_567_8f32.to_le_bytes());
    let feed = write_file(dir.path(), "feed.pb", &data);

    let stdout = run_ok(&["decode", &feed, "--precision", "2"]);
    assert_eq!(stdout.trim(), r#"{"9":1.23}"#);

    let stdout = run_ok(&["decode", &feed, "--full-precision"]);
    assert_eq!(stdout.trim(), r#"{"9":1.2345678}"#);
}

#[test]
fn test_decode_warning_summary() {
    let dir = tempfile::tempdir().unwrap();
    // varint field 1, then a bare end-group tag for field 2
    let feed = write_file(dir.path(), "feed.pb", &[0x08, 0x01, 0x14]);

    let output = run(&["decode", &feed]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1 warning"), "stderr: {stderr}");

    let stderr = run_err(&["decode", &feed, "--strict"]);
    assert!(stderr.contains("Unsupported wire type"), "stderr: {stderr}");
}

#[test]
fn test_decode_truncated_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let feed = write_file(dir.path(), "feed.pb", &[0x0A, 0x09, b'x']);

    let stderr = run_err(&["decode", &feed]);
    assert!(stderr.contains("Truncated message"), "stderr: {stderr}");
}

#[test]
fn test_decode_missing_file() {
    let stderr = run_err(&["decode", "/nonexistent/feed.pb"]);
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_decode_conflicting_flags() {
    run_err(&["decode", "--strict", "--skip-payload"]);
    run_err(&["decode", "--precision", "3", "--full-precision"]);
}

// ============================================================================
// Schema
// ============================================================================

#[test]
fn test_schema_show_builtin_toml() {
    let stdout = run_ok(&["schema", "show"]);
    assert!(stdout.starts_with("name = \"FeedMessage\""));
    assert!(stdout.contains("gtfs_realtime_version"));
}

#[test]
fn test_schema_show_json_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_file(dir.path(), "schema.toml", ID_SCHEMA.as_bytes());

    let stdout = run_ok(&["schema", "show", "--schema", &schema, "--format", "json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["name"], "Root");
    assert_eq!(json["fields"]["1"]["name"], "id");
}

#[test]
fn test_schema_show_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let bad = b"name = \"Root\"\n[fields.x]\nname = \"id\"\n";
    let schema = write_file(dir.path(), "bad.toml", bad);

    let stderr = run_err(&["schema", "show", "--schema", &schema]);
    assert!(stderr.contains("failed to load schema"), "stderr: {stderr}");
}
