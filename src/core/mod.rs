//! Core engine for cargo-ferry operations
//!
//! - **error**: Error types with contextual help messages and exit codes
//! - **proc**: Subprocess execution with concurrent stream capture and
//!   live mirroring (the primitive every command is built on)

pub mod error;
pub mod proc;
