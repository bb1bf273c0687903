//! Error types for cargo-ferry with contextual messages and exit codes
//!
//! This module provides a unified error type that categorizes errors and
//! maps each category to a process exit code. Subprocess failures carry the
//! full captured output so the top level can print a complete diagnostic
//! without re-running the command.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for cargo-ferry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (bad arguments, missing manifest or artifact)
  User = 1,
  /// System error (I/O, executable could not be started)
  System = 2,
  /// An external tool ran and failed (non-zero exit, cancellation)
  Tool = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Structured failure of a child process that exited non-zero.
///
/// Both streams are fully drained before this is constructed, so the
/// captured text is byte-complete.
#[derive(Debug, Clone)]
pub struct ExecFailure {
  /// The argument list the process was started with (argv[0] first)
  pub args: Vec<String>,
  /// Non-zero exit status (-1 when killed by a signal)
  pub status: i32,
  /// Everything the child wrote to stdout
  pub stdout: String,
  /// Everything the child wrote to stderr
  pub stderr: String,
}

impl fmt::Display for ExecFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Command failed with exit status {}: {}",
      self.status,
      crate::utils::shell_join(&self.args)
    )?;
    if !self.stdout.is_empty() {
      write!(f, "\n--- stdout ---\n{}", self.stdout.trim_end_matches('\n'))?;
    }
    if !self.stderr.is_empty() {
      write!(f, "\n--- stderr ---\n{}", self.stderr.trim_end_matches('\n'))?;
    }
    Ok(())
  }
}

/// Main error type for cargo-ferry
#[derive(Debug)]
pub enum FerryError {
  /// The executable could not be started (not found, not executable)
  Launch { program: String, source: io::Error },

  /// The child ran to completion but exited non-zero
  Exec(ExecFailure),

  /// The invocation was cancelled before the child finished
  Cancelled { command: String },

  /// Manifest precondition errors
  Manifest(ManifestError),

  /// An expected build artifact is missing
  MissingArtifact { path: PathBuf },

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl FerryError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    FerryError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    FerryError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      FerryError::Message { message, context, help } => FerryError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      FerryError::Launch { .. } => ExitCode::System,
      FerryError::Exec(_) => ExitCode::Tool,
      FerryError::Cancelled { .. } => ExitCode::Tool,
      FerryError::Manifest(_) => ExitCode::User,
      FerryError::MissingArtifact { .. } => ExitCode::User,
      FerryError::Io(_) => ExitCode::System,
      FerryError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      FerryError::Launch { program, .. } => Some(format!(
        "Check that '{}' is installed and on your PATH.",
        program
      )),
      FerryError::Manifest(e) => e.help_message(),
      FerryError::MissingArtifact { .. } => {
        Some("Run `cargo ferry build` first to produce the package artifact.".to_string())
      }
      FerryError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for FerryError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FerryError::Launch { program, source } => {
        write!(f, "Failed to launch '{}': {}", program, source)
      }
      FerryError::Exec(e) => write!(f, "{}", e),
      FerryError::Cancelled { command } => write!(f, "Command cancelled: {}", command),
      FerryError::Manifest(e) => write!(f, "{}", e),
      FerryError::MissingArtifact { path } => {
        write!(f, "Expected package artifact not found: {}", path.display())
      }
      FerryError::Io(e) => write!(f, "I/O error: {}", e),
      FerryError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for FerryError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      FerryError::Launch { source, .. } => Some(source),
      FerryError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for FerryError {
  fn from(err: io::Error) -> Self {
    FerryError::Io(err)
  }
}

impl From<String> for FerryError {
  fn from(msg: String) -> Self {
    FerryError::message(msg)
  }
}

impl From<&str> for FerryError {
  fn from(msg: &str) -> Self {
    FerryError::message(msg)
  }
}

impl From<toml_edit::TomlError> for FerryError {
  fn from(err: toml_edit::TomlError) -> Self {
    FerryError::message(format!("TOML parse error: {}", err))
  }
}

impl From<semver::Error> for FerryError {
  fn from(err: semver::Error) -> Self {
    FerryError::with_help(
      format!("Invalid semantic version: {}", err),
      "Versions must look like MAJOR.MINOR.PATCH, e.g. 1.2.3",
    )
  }
}

impl From<serde_json::Error> for FerryError {
  fn from(err: serde_json::Error) -> Self {
    FerryError::message(format!("JSON error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for FerryError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    FerryError::message(format!("UTF-8 conversion error: {}", err))
  }
}

/// Convert anyhow::Error to FerryError (used by test helpers)
impl From<anyhow::Error> for FerryError {
  fn from(err: anyhow::Error) -> Self {
    FerryError::message(err.to_string())
  }
}

/// Manifest precondition errors
#[derive(Debug)]
pub enum ManifestError {
  /// Cargo.toml not found
  NotFound { path: PathBuf },

  /// Missing required field
  MissingField { field: String },
}

impl ManifestError {
  fn help_message(&self) -> Option<String> {
    match self {
      ManifestError::NotFound { .. } => {
        Some("Run cargo-ferry from the package root (the directory containing Cargo.toml).".to_string())
      }
      ManifestError::MissingField { .. } => None,
    }
  }
}

impl fmt::Display for ManifestError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ManifestError::NotFound { path } => {
        write!(f, "Manifest not found: {}", path.display())
      }
      ManifestError::MissingField { field } => {
        write!(f, "Missing required field in manifest: {}", field)
      }
    }
  }
}

/// Result type alias for cargo-ferry
pub type FerryResult<T> = Result<T, FerryError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> FerryResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> FerryResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<FerryError>,
{
  fn context(self, ctx: impl Into<String>) -> FerryResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> FerryResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &FerryError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
