//! Project manifest (Cargo.toml) reading and lossless rewriting
//!
//! Uses `toml_edit` so that stamping a new version preserves every comment
//! and all formatting in the file. Only the `[package]` name and version
//! are interpreted; everything else passes through untouched.

use crate::core::error::{FerryError, FerryResult, ManifestError, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};
use toml_edit::DocumentMut;

pub const MANIFEST_FILE: &str = "Cargo.toml";

/// A loaded project manifest, rewritable in place
#[derive(Debug)]
pub struct Manifest {
  path: PathBuf,
  doc: DocumentMut,
}

impl Manifest {
  /// Load the manifest from a package root directory
  pub fn load(root: &Path) -> FerryResult<Self> {
    let path = root.join(MANIFEST_FILE);
    if !path.exists() {
      return Err(FerryError::Manifest(ManifestError::NotFound { path }));
    }

    let content = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let doc: DocumentMut = content.parse()?;

    Ok(Self { path, doc })
  }

  /// The `[package]` name
  pub fn name(&self) -> FerryResult<&str> {
    self.package_field("name")
  }

  /// The `[package]` version string
  pub fn version(&self) -> FerryResult<&str> {
    self.package_field("version")
  }

  fn package_field(&self, field: &str) -> FerryResult<&str> {
    self
      .doc
      .get("package")
      .and_then(|package| package.as_table_like())
      .and_then(|package| package.get(field))
      .and_then(|value| value.as_str())
      .ok_or_else(|| {
        FerryError::Manifest(ManifestError::MissingField {
          field: format!("package.{}", field),
        })
      })
  }

  /// Stamp a new package version (takes a parsed version so callers cannot
  /// write a malformed one)
  pub fn set_version(&mut self, version: &semver::Version) -> FerryResult<()> {
    let package = self
      .doc
      .get_mut("package")
      .and_then(|package| package.as_table_mut())
      .ok_or_else(|| {
        FerryError::Manifest(ManifestError::MissingField {
          field: "package".to_string(),
        })
      })?;

    package["version"] = toml_edit::value(version.to_string());
    Ok(())
  }

  /// Write the manifest back, preserving formatting
  pub fn save(&self) -> FerryResult<()> {
    fs::write(&self.path, self.doc.to_string()).with_context(|| format!("Failed to write {}", self.path.display()))?;
    Ok(())
  }
}
