//! `cargo ferry publish` - upload a previously built artifact
//!
//! The registry token travels as an environment override, not a command
//! line argument, so the invocation stays copy-paste safe for the parts
//! that are not secret.

use crate::core::error::FerryResult;
use crate::core::proc::{Invocation, Runner};
use crate::dist;
use crate::manifest::Manifest;
use std::env;

/// Environment variable cargo reads the registry credential from
pub const TOKEN_VAR: &str = "CARGO_REGISTRY_TOKEN";

/// Run the publish command
pub fn run_publish(token: String) -> FerryResult<()> {
  let root = env::current_dir()?;
  let manifest = Manifest::load(&root)?;
  let name = manifest.name()?.to_string();
  let version = manifest.version()?.to_string();

  // The artifact must already exist; publish never builds implicitly
  let artifact = dist::require_artifact(&root, &name, &version)?;

  println!("🚀 Publishing {} {} ({})", name, version, artifact.display());
  let runner = Runner::new();
  runner.run(&upload_invocation(&root, token))?;

  println!("✅ Published {} {}", name, version);
  Ok(())
}

/// Build the upload invocation (shared with the release pipeline)
pub fn upload_invocation(root: &std::path::Path, token: String) -> Invocation {
  Invocation::new(["cargo", "publish", "--no-verify", "--allow-dirty"])
    .cwd(root)
    .env(TOKEN_VAR, token)
}
