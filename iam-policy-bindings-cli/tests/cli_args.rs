use assert_cmd::Command as AssertCommand;
use predicates::prelude::*;
use std::process::Command;

// Test policy document constants
const SAMPLE_POLICY: &str = r#"{
  "etag": "BwWWja0YfJA=",
  "version": 1,
  "bindings": [
    {"role": "roles/owner", "members": ["user:phred@example.com", "group:admins@groups.example.com"]},
    {"role": "roles/viewer", "members": ["allUsers"]}
  ]
}"#;

const V3_POLICY: &str = r#"{"etag": "BwWWja0YfJA=", "version": 3, "bindings": [{"role": "roles/owner", "members": ["user:a@x.com"]}]}"#;

fn cli() -> AssertCommand {
    let mut cmd = AssertCommand::new(env!("CARGO_BIN_EXE_iam-policy-bindings"));
    cmd.env_remove("IAM_POLICY_FILE").env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let out = Command::new(env!("CARGO_BIN_EXE_iam-policy-bindings"))
        .arg("--help")
        .output()
        .expect("failed to run --help");
    let s = String::from_utf8_lossy(&out.stdout);
    for subcommand in ["show", "roles", "get", "set", "remove", "member", "legacy"] {
        assert!(s.contains(subcommand), "help should mention {}: {}", subcommand, s);
    }
}

#[test]
fn test_roles_from_stdin() {
    cli()
        .arg("roles")
        .write_stdin(SAMPLE_POLICY)
        .assert()
        .success()
        .stdout("roles/owner\nroles/viewer\n");
}

#[test]
fn test_get_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("policy.json");
    std::fs::write(&path, SAMPLE_POLICY).expect("write policy");

    cli()
        .args(["get", "--role", "roles/owner", "--policy"])
        .arg(&path)
        .assert()
        .success()
        .stdout("[\"group:admins@groups.example.com\",\"user:phred@example.com\"]\n");
}

#[test]
fn test_get_missing_role_is_empty() {
    cli()
        .args(["get", "--role", "roles/editor"])
        .write_stdin(SAMPLE_POLICY)
        .assert()
        .success()
        .stdout("[]\n");
}

#[test]
fn test_set_emits_updated_policy() {
    let output = cli()
        .args([
            "set",
            "--role",
            "roles/editor",
            "user:a@x.com",
            "user:a@x.com",
            "group:g@x.com",
        ])
        .write_stdin(SAMPLE_POLICY)
        .output()
        .expect("failed to run set");
    assert_eq!(output.status.code(), Some(0));

    let resource: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(resource["etag"], "BwWWja0YfJA=");
    assert_eq!(resource["version"], 1);
    assert_eq!(
        resource["bindings"][2],
        serde_json::json!({"role": "roles/editor", "members": ["group:g@x.com", "user:a@x.com"]})
    );
}

#[test]
fn test_remove_last_binding_omits_bindings() {
    cli()
        .args(["remove", "--role", "roles/owner"])
        .write_stdin(r#"{"bindings": [{"role": "roles/owner", "members": ["user:a@x.com"]}]}"#)
        .assert()
        .success()
        .stdout("{}\n");
}

#[test]
fn test_remove_missing_role_fails() {
    cli()
        .args(["remove", "--role", "roles/editor"])
        .write_stdin(SAMPLE_POLICY)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("role not found: roles/editor"));
}

#[test]
fn test_version_three_policy_is_rejected() {
    cli()
        .arg("roles")
        .write_stdin(V3_POLICY)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unsupported policy version 3"));
}

#[test]
fn test_show_passes_version_three_policy_through() {
    cli()
        .arg("show")
        .write_stdin(V3_POLICY)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version\":3"));
}

#[test]
fn test_malformed_policy_fails() {
    cli()
        .arg("show")
        .write_stdin(r#"{"bindings": "roles/owner"}"#)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse policy document"));
}

#[test]
fn test_member_formatting() {
    cli()
        .args(["member", "serviceAccount", "account-1234@accounts.example.com"])
        .assert()
        .success()
        .stdout("serviceAccount:account-1234@accounts.example.com\n");

    cli()
        .args(["member", "allAuthenticatedUsers"])
        .assert()
        .success()
        .stdout("allAuthenticatedUsers\n");
}

#[test]
fn test_unknown_member_kind_is_usage_error() {
    cli()
        .args(["member", "robot", "r2d2"])
        .assert()
        .code(2);
}

#[test]
fn test_legacy_owners() {
    cli()
        .args(["legacy", "owners"])
        .write_stdin(SAMPLE_POLICY)
        .assert()
        .success()
        .stdout(predicate::str::contains("user:phred@example.com"));
}

#[test]
fn test_in_place_rewrites_policy_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("policy.json");
    std::fs::write(&path, SAMPLE_POLICY).expect("write policy");

    cli()
        .args(["add-member", "--role", "roles/viewer", "domain:example.com", "--in-place", "--policy"])
        .arg(&path)
        .assert()
        .success()
        .stdout("");

    let updated = std::fs::read_to_string(&path).expect("read policy");
    assert!(updated.contains("domain:example.com"), "policy was: {}", updated);
    assert!(updated.contains("BwWWja0YfJA="), "policy was: {}", updated);
}

#[test]
fn test_pretty_output() {
    cli()
        .args(["show", "--pretty"])
        .write_stdin(r#"{"etag": "abc"}"#)
        .assert()
        .success()
        .stdout("{\n  \"etag\": \"abc\"\n}\n");
}
