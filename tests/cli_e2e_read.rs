//! End-to-end tests for the `read` command.

mod common;
use common::prelude::*;

const FULL_RESPONSE: &str = r#"{
  "role_id": "4b8f",
  "token_bound_cidrs": ["10.0.0.0/8"],
  "token_max_ttl": 7200,
  "token_ttl": 3600,
  "token_explicit_max_ttl": 0,
  "token_no_default_policy": true,
  "token_period": 0,
  "token_policies": ["admin", "default"],
  "token_type": "service",
  "token_num_uses": 10
}"#;

#[test]
fn test_read_prints_token_fields() {
    let fixture = TestFixture::new().with_file("response.json", FULL_RESPONSE);

    let output = cargo_bin_cmd!("token-fields")
        .arg("read")
        .arg("--response")
        .arg(fixture.path("response.json"))
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let object = parsed.as_object().unwrap();
    assert_eq!(object.len(), 9);
    assert!(!object.contains_key("role_id"));
    assert_eq!(parsed["token_ttl"], 3600);
    assert_eq!(parsed["token_type"], "service");
    assert_eq!(parsed["token_policies"], serde_json::json!(["admin", "default"]));
}

#[test]
fn test_read_missing_keys_are_null() {
    let fixture = TestFixture::new().with_file("response.json", r#"{"token_ttl": 60}"#);

    cargo_bin_cmd!("token-fields")
        .arg("read")
        .arg("--response")
        .arg(fixture.path("response.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"token_ttl\": 60"))
        .stdout(predicate::str::contains("\"token_type\": null"));
}

#[test]
fn test_read_null_response_fails() {
    let fixture = TestFixture::new().with_file("response.json", "null");

    cargo_bin_cmd!("token-fields")
        .arg("read")
        .arg("--response")
        .arg(fixture.path("response.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Remote response missing"));
}

#[test]
fn test_read_updates_state() {
    let fixture = TestFixture::new()
        .with_file("response.json", FULL_RESPONSE)
        .with_state(states::ONLY_POLICIES);

    cargo_bin_cmd!("token-fields")
        .arg("read")
        .arg("--format")
        .arg("yaml")
        .arg("--response")
        .arg(fixture.path("response.json"))
        .arg("--state")
        .arg(fixture.path("state.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("synced:"))
        .stdout(predicate::str::contains("token_ttl: 3600"))
        .stdout(predicate::str::contains("token_type: service"));
}

#[test]
fn test_read_type_mismatch_in_state_update() {
    let fixture = TestFixture::new()
        .with_file("response.json", r#"{"token_num_uses": "ten"}"#)
        .with_state(states::ONLY_POLICIES);

    cargo_bin_cmd!("token-fields")
        .arg("read")
        .arg("--response")
        .arg(fixture.path("response.json"))
        .arg("--state")
        .arg(fixture.path("state.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Type mismatch for token_num_uses"));
}
