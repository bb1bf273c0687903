//! Package artifact layout and precondition checks
//!
//! `cargo package` drops its output under `target/package/`; the commands
//! here agree on that layout, verify expected artifacts before an upload,
//! and wipe stale output before a rebuild.

use crate::core::error::{FerryError, FerryResult, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory `cargo package` writes artifacts into, relative to the root
pub fn dist_dir(root: &Path) -> PathBuf {
  root.join("target").join("package")
}

/// Expected artifact path for a package name and version
pub fn artifact_path(root: &Path, name: &str, version: &str) -> PathBuf {
  dist_dir(root).join(format!("{}-{}.crate", name, version))
}

/// Verify the artifact exists, returning its path
pub fn require_artifact(root: &Path, name: &str, version: &str) -> FerryResult<PathBuf> {
  let path = artifact_path(root, name, version);
  if !path.exists() {
    return Err(FerryError::MissingArtifact { path });
  }
  Ok(path)
}

/// Remove stale packaging output; returns true if anything was deleted
pub fn clean(root: &Path) -> FerryResult<bool> {
  let dist = dist_dir(root);
  if !dist.exists() {
    return Ok(false);
  }
  fs::remove_dir_all(&dist).with_context(|| format!("Failed to remove {}", dist.display()))?;
  Ok(true)
}
