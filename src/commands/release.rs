//! `cargo ferry release` - the full release pipeline
//!
//! Computes the next version and tag, writes them to handoff files for CI,
//! stamps the manifest, rebuilds the package from a clean dist folder,
//! verifies the artifact, and uploads it when a token was supplied.
//! Any step failing aborts the pipeline with the step's diagnostic.

use crate::commands::publish::upload_invocation;
use crate::commands::version::next_version;
use crate::core::error::{FerryResult, ResultExt};
use crate::core::proc::{Invocation, Runner};
use crate::manifest::Manifest;
use crate::{dist, utils};
use serde::Serialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// CI handoff file holding the computed version
pub const VERSION_FILE: &str = ".release-version";
/// CI handoff file holding the computed release tag
pub const TAG_FILE: &str = ".release-tag";

/// Release summary for `--json` output
#[derive(Debug, Serialize)]
struct ReleaseSummary {
  name: String,
  version: String,
  tag: String,
  artifact: PathBuf,
  published: bool,
}

/// Run the release command
pub fn run_release(token: Option<String>, json: bool) -> FerryResult<()> {
  let root = env::current_dir()?;
  let runner = Runner::new();

  utils::status("determining version of package");
  let version_str = next_version(&runner, false)?;
  utils::status(&format!("version: {}", version_str));
  fs::write(root.join(VERSION_FILE), &version_str).context("Failed to write version handoff file")?;

  utils::status("determining tag of package");
  let tag = next_version(&runner, true)?;
  utils::status(&format!("tag: {}", tag));
  fs::write(root.join(TAG_FILE), &tag).context("Failed to write tag handoff file")?;

  utils::status("writing project version");
  let version: semver::Version = version_str.parse()?;
  let mut manifest = Manifest::load(&root)?;
  let name = manifest.name()?.to_string();
  manifest.set_version(&version)?;
  manifest.save()?;

  if dist::clean(&root)? {
    utils::status("deleted existing dist folder");
  }

  utils::status("building package");
  runner.run(&Invocation::new(["cargo", "package", "--allow-dirty"]).cwd(&root))?;
  let artifact = dist::require_artifact(&root, &name, &version_str)?;
  utils::status(&format!("package name: {}", name));
  utils::status(&format!("package version: {}", version_str));

  let published = match token {
    Some(token) => {
      utils::status("publishing package");
      runner.run(&upload_invocation(&root, token))?;
      true
    }
    None => false,
  };

  let summary = ReleaseSummary {
    name,
    version: version_str,
    tag,
    artifact,
    published,
  };

  if json {
    println!("{}", serde_json::to_string_pretty(&summary)?);
  } else if summary.published {
    println!("✅ Released {} {}", summary.name, summary.version);
  } else {
    println!("✅ Release {} {} ready (no token supplied, upload skipped)", summary.name, summary.version);
    println!("   Artifact: {}", summary.artifact.display());
  }

  Ok(())
}
