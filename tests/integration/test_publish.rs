//! Integration tests for `cargo ferry publish` preconditions

use crate::helpers::{TestPackage, run_ferry_raw};
use anyhow::Result;

#[test]
fn test_publish_requires_existing_artifact() -> Result<()> {
  let pkg = TestPackage::new("ferry-sample", "0.1.0")?;

  let output = run_ferry_raw(&pkg.path, &["ferry", "publish", "--token", "t0k3n"], None)?;
  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Expected package artifact not found"));
  assert!(stderr.contains("ferry-sample-0.1.0.crate"));

  Ok(())
}

#[test]
fn test_publish_requires_manifest() -> Result<()> {
  let dir = tempfile::tempdir()?;
  let output = run_ferry_raw(dir.path(), &["ferry", "publish", "--token", "t0k3n"], None)?;
  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("Manifest not found"));

  Ok(())
}

#[test]
fn test_build_requires_manifest() -> Result<()> {
  let dir = tempfile::tempdir()?;
  let output = run_ferry_raw(dir.path(), &["ferry", "build"], None)?;
  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("Manifest not found"));

  Ok(())
}
