//! CLI commands for cargo-ferry
//!
//! - **build**: Package the crate into a distributable artifact
//! - **publish**: Upload a previously built artifact with a registry token
//! - **version**: Compute the next semantic version (`next-version`) and
//!   stamp the manifest (`set-version`)
//! - **release**: The full pipeline: version, stamp, build, verify, upload
//!
//! Every command is one or more [`Runner`](crate::core::proc::Runner)
//! invocations plus manifest reads/writes; failures propagate to `main`
//! which prints the diagnostic and exits non-zero.

pub mod build;
pub mod publish;
pub mod release;
pub mod version;

pub use build::run_build;
pub use publish::run_publish;
pub use release::run_release;
pub use version::{run_next_version, run_set_version};
