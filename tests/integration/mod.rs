//! Integration tests for the cargo-ferry CLI
//!
//! Each test drives the real binary against a throwaway package directory,
//! with a stub `semantic-release` on PATH where version computation is
//! involved.

mod test_publish;
mod test_release;
mod test_version;
