//! CLI tests for the wolk command-line interface.

use assert_cmd::Command;
use predicates::prelude::*;

fn wolk() -> Command {
    Command::cargo_bin("wolk").unwrap()
}

#[test]
fn test_cli_help() {
    wolk()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("channels"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("decode"))
        .stdout(predicate::str::contains("response-channel"));
}

#[test]
fn test_cli_version() {
    wolk()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wolk"));
}

#[test]
fn test_no_subcommand_shows_error() {
    wolk().assert().failure();
}

#[test]
fn test_inspect_channel() {
    wolk()
        .args(["inspect", "p2g/GATEWAY/file_upload_initiate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("p2g"))
        .stdout(predicate::str::contains("GATEWAY"))
        .stdout(predicate::str::contains("file_upload_initiate"));
}

#[test]
fn test_channels_for_device() {
    wolk()
        .args(["channels", "DEVICE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("p2d/DEVICE/feed_values"))
        .stdout(predicate::str::contains("p2d/connection_status"));
}

#[test]
fn test_channels_for_gateway_include_local_registration() {
    wolk()
        .args(["channels", "GATEWAY", "--gateway"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gateway_registration"))
        .stdout(predicate::str::contains("d2p/GATEWAY/device_registration"))
        .stdout(predicate::str::contains("d2p/GATEWAY/registered_devices"));
}

#[test]
fn test_validate_accepts_conforming_payload() {
    wolk()
        .args(["validate", "d2p/DEVICE/feed_values", r#"[{"T": 21.5, "timestamp": 1}]"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn test_validate_rejects_bad_payload() {
    wolk()
        .args(["validate", "d2p/DEVICE/feed_values", r#"{"T": 21.5}"#])
        .assert()
        .failure();
}

#[test]
fn test_decode_feed_values() {
    wolk()
        .args(["decode", "p2d/DEVICE/feed_values", r#"[{"T": 21.5, "timestamp": 1}]"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("FeedValues"))
        .stdout(predicate::str::contains("21.5"));
}

#[test]
fn test_decode_platform_status() {
    wolk()
        .args(["decode", "p2d/connection_status", "CONNECTED"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Connected"));
}

#[test]
fn test_decode_invalid_payload_fails() {
    wolk()
        .args(["decode", "p2d/DEVICE/time", "not a number"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not be decoded"));
}

#[test]
fn test_decode_unknown_type_fails() {
    wolk()
        .args(["decode", "p2d/DEVICE/not_a_type", "{}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown message type"));
}

#[test]
fn test_response_channel() {
    wolk()
        .args(["response-channel", "d2p/DEVICE/pull_parameters"])
        .assert()
        .success()
        .stdout(predicate::str::contains("p2d/DEVICE/parameters"));

    wolk()
        .args(["response-channel", "d2p/DEVICE/feed_values"])
        .assert()
        .failure();
}
