//! Integration tests for `cargo ferry next-version` and `set-version`

use crate::helpers::{TestPackage, run_ferry, run_ferry_raw, stub_semantic_release};
use anyhow::Result;

#[test]
fn test_next_version_prints_computed_version() -> Result<()> {
  let pkg = TestPackage::new("ferry-sample", "0.1.0")?;
  let stub = stub_semantic_release("9.9.9", "v9.9.9")?;

  let output = run_ferry(&pkg.path, &["ferry", "next-version"], Some(stub.path()))?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert_eq!(stdout.trim(), "9.9.9");

  // The invocation itself is logged to the diagnostic stream
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("$ semantic-release --noop --strict version --print"));

  Ok(())
}

#[test]
fn test_next_version_as_tag() -> Result<()> {
  let pkg = TestPackage::new("ferry-sample", "0.1.0")?;
  let stub = stub_semantic_release("9.9.9", "v9.9.9")?;

  let output = run_ferry(&pkg.path, &["ferry", "next-version", "--as-tag"], Some(stub.path()))?;
  assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "v9.9.9");

  Ok(())
}

#[test]
fn test_next_version_json() -> Result<()> {
  let pkg = TestPackage::new("ferry-sample", "0.1.0")?;
  let stub = stub_semantic_release("2.0.0", "v2.0.0")?;

  let output = run_ferry(&pkg.path, &["ferry", "next-version", "--json"], Some(stub.path()))?;
  let parsed: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(parsed["value"], "2.0.0");
  assert_eq!(parsed["as_tag"], false);

  Ok(())
}

#[test]
fn test_next_version_tool_failure_propagates() -> Result<()> {
  use std::os::unix::fs::PermissionsExt;

  let pkg = TestPackage::new("ferry-sample", "0.1.0")?;

  // A semantic-release that always fails, with diagnostics on stderr
  let stub = tempfile::tempdir()?;
  let script = stub.path().join("semantic-release");
  std::fs::write(&script, "#!/bin/sh\necho 'no releasable commits' >&2\nexit 4\n")?;
  std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))?;

  let output = run_ferry_raw(&pkg.path, &["ferry", "next-version"], Some(stub.path()))?;
  // Tool failures map to exit code 3 and carry the captured streams
  assert_eq!(output.status.code(), Some(3));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("exit status 4"));
  assert!(stderr.contains("no releasable commits"));

  Ok(())
}

#[test]
fn test_set_version_rewrites_manifest() -> Result<()> {
  let pkg = TestPackage::new("ferry-sample", "0.1.0")?;

  run_ferry(&pkg.path, &["ferry", "set-version", "1.2.3"], None)?;

  let manifest = pkg.read_file("Cargo.toml")?;
  assert!(manifest.contains("version = \"1.2.3\""));
  // Lossless edit keeps surrounding content
  assert!(manifest.contains("# test package manifest"));
  assert!(manifest.contains("name = \"ferry-sample\""));

  Ok(())
}

#[test]
fn test_set_version_rejects_invalid_input() -> Result<()> {
  let pkg = TestPackage::new("ferry-sample", "0.1.0")?;

  let output = run_ferry_raw(&pkg.path, &["ferry", "set-version", "not-a-version"], None)?;
  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Invalid semantic version"));

  // Manifest untouched
  assert!(pkg.read_file("Cargo.toml")?.contains("version = \"0.1.0\""));

  Ok(())
}

#[test]
fn test_set_version_without_manifest_fails() -> Result<()> {
  let dir = tempfile::tempdir()?;
  let output = run_ferry_raw(dir.path(), &["ferry", "set-version", "1.0.0"], None)?;
  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("Manifest not found"));

  Ok(())
}
