//! `cargo ferry build` - package the crate into a distributable artifact

use crate::core::error::FerryResult;
use crate::core::proc::{Invocation, Runner};
use crate::manifest::Manifest;
use crate::{dist, utils};
use std::env;

/// Run the build command
pub fn run_build() -> FerryResult<()> {
  let root = env::current_dir()?;
  let manifest = Manifest::load(&root)?;
  let name = manifest.name()?.to_string();
  let version = manifest.version()?.to_string();

  if dist::clean(&root)? {
    utils::status("deleted existing dist folder");
  }

  println!("📦 Building package {} {}", name, version);
  let runner = Runner::new();
  runner.run(&Invocation::new(["cargo", "package", "--allow-dirty"]).cwd(&root))?;

  let artifact = dist::require_artifact(&root, &name, &version)?;
  println!("✅ Built {}", artifact.display());

  Ok(())
}
