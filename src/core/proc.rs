//! Subprocess execution with live output mirroring
//!
//! The one non-trivial primitive in this tool: run an external command,
//! drain stdout and stderr concurrently (one reader thread per stream),
//! tee every chunk to a diagnostic sink as it arrives, and keep the full
//! captured text for structured error reporting.
//!
//! Draining both pipes in parallel with the wait is load-bearing: a child
//! that fills both pipe buffers while the parent drains them sequentially
//! stalls forever. Each reader reads until end-of-stream, not merely until
//! the child reports terminated, since a pipe can still hold buffered
//! bytes after the child exits.

use crate::core::error::{ExecFailure, FerryError, FerryResult};
use crate::utils::shell_join;
use std::collections::BTreeMap;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Shared sink the runner mirrors child output to (stderr in production,
/// an in-memory buffer in tests)
pub type DiagnosticSink = Arc<Mutex<dyn Write + Send>>;

/// Poll interval while waiting on a cancellable child
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Read chunk size for the stream drainers
const READ_CHUNK: usize = 8192;

/// A single request to execute an external command.
///
/// Immutable once constructed; built with the chained setters below.
/// Environment overrides are merged over the inherited environment, and
/// kept ordered so the logged description is deterministic.
#[derive(Debug, Clone)]
pub struct Invocation {
  args: Vec<String>,
  cwd: Option<PathBuf>,
  env: BTreeMap<String, String>,
}

impl Invocation {
  /// Build an invocation from an argument list (argv[0] is the executable)
  pub fn new<I, S>(args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      args: args.into_iter().map(Into::into).collect(),
      cwd: None,
      env: BTreeMap::new(),
    }
  }

  /// Append one argument
  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  /// Set the working directory for the child
  pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
    self.cwd = Some(dir.into());
    self
  }

  /// Add an environment override (merged over the inherited environment)
  pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.env.insert(key.into(), value.into());
    self
  }

  /// The argument list (argv[0] first)
  pub fn args(&self) -> &[String] {
    &self.args
  }

  /// Render a copy-paste re-runnable description of this invocation.
  ///
  /// Appends `(env: KEY=value ...)` listing only the overrides whose value
  /// differs from the ambient environment, and `(cwd: <path>)` when a
  /// working directory is set. Unchanged overrides are suppressed so the
  /// line shows what actually changes behavior.
  fn describe(&self, ambient: &BTreeMap<String, String>) -> String {
    let mut line = shell_join(&self.args);

    if !self.env.is_empty() {
      let diff: Vec<String> = self
        .env
        .iter()
        .filter(|&(key, value)| ambient.get(key) != Some(value))
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();
      if !diff.is_empty() {
        line.push_str(&format!(" (env: {})", diff.join(" ")));
      }
    }

    if let Some(cwd) = &self.cwd {
      line.push_str(&format!(" (cwd: {})", cwd.display()));
    }

    line
  }
}

/// Cooperative cancellation handle for an in-flight invocation.
///
/// Cloneable; `cancel()` from any thread kills the child, which closes the
/// pipes and unblocks both readers, and the invocation fails with
/// [`FerryError::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
  #[allow(dead_code)] // Kept as API for embedding callers; commands run uncancelled
  pub fn new() -> Self {
    Self::default()
  }

  #[allow(dead_code)]
  pub fn cancel(&self) {
    self.0.store(true, Ordering::SeqCst);
  }

  pub fn is_cancelled(&self) -> bool {
    self.0.load(Ordering::SeqCst)
  }
}

/// Executes external commands, mirroring their output live.
///
/// The ambient environment snapshot (used only for the env-diff log line)
/// and the diagnostic sink are explicit so tests can substitute fakes.
/// Nothing is shared between invocations; a runner can be used from
/// multiple callers in parallel.
pub struct Runner {
  ambient: BTreeMap<String, String>,
  sink: DiagnosticSink,
}

impl Runner {
  /// Runner over the real process environment, mirroring to stderr
  pub fn new() -> Self {
    Self {
      ambient: std::env::vars().collect(),
      sink: Arc::new(Mutex::new(io::stderr())),
    }
  }

  /// Runner with an injected environment snapshot and diagnostic sink
  pub fn with_diagnostics(ambient: BTreeMap<String, String>, sink: DiagnosticSink) -> Self {
    Self { ambient, sink }
  }

  /// Execute an invocation to completion, returning the captured stdout.
  ///
  /// Blocks until the child has exited AND both streams have been drained
  /// to end-of-stream. Non-zero exit becomes [`FerryError::Exec`] carrying
  /// the argv, status, and both captured streams; a child that cannot be
  /// started fails with [`FerryError::Launch`] before any capture begins.
  pub fn run(&self, invocation: &Invocation) -> FerryResult<String> {
    self.run_cancellable(invocation, None)
  }

  /// Like [`Runner::run`], but aborts with [`FerryError::Cancelled`] when
  /// the flag is triggered (the child is killed and both pipes drained
  /// before returning)
  pub fn run_cancellable(&self, invocation: &Invocation, cancel: Option<&CancelFlag>) -> FerryResult<String> {
    let args = invocation.args();
    let program = args
      .first()
      .ok_or_else(|| FerryError::message("Cannot run an empty command line"))?;

    self.log_line(&format!("$ {}", invocation.describe(&self.ambient)));

    let mut cmd = Command::new(program);
    cmd.args(&args[1..]);
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    if let Some(cwd) = &invocation.cwd {
      cmd.current_dir(cwd);
    }
    for (key, value) in &invocation.env {
      cmd.env(key, value);
    }

    let mut child = cmd.spawn().map_err(|source| FerryError::Launch {
      program: program.clone(),
      source,
    })?;

    let stdout_pipe = child
      .stdout
      .take()
      .ok_or_else(|| FerryError::message("Child stdout was not piped"))?;
    let stderr_pipe = child
      .stderr
      .take()
      .ok_or_else(|| FerryError::message("Child stderr was not piped"))?;

    let stdout_reader = spawn_drain(stdout_pipe, Arc::clone(&self.sink));
    let stderr_reader = spawn_drain(stderr_pipe, Arc::clone(&self.sink));

    let outcome = wait_for_exit(&mut child, cancel)?;

    // Child exit alone is not completion: join both readers so no bytes
    // still buffered in the pipes are dropped.
    let stdout = join_reader(stdout_reader)?;
    let stderr = join_reader(stderr_reader)?;

    match outcome {
      WaitOutcome::Cancelled => Err(FerryError::Cancelled {
        command: shell_join(args),
      }),
      WaitOutcome::Exited(status) if status.success() => Ok(String::from_utf8_lossy(&stdout).into_owned()),
      WaitOutcome::Exited(status) => Err(FerryError::Exec(ExecFailure {
        args: args.to_vec(),
        status: status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
      })),
    }
  }

  /// Best-effort write of one line to the diagnostic sink
  fn log_line(&self, line: &str) {
    if let Ok(mut sink) = self.sink.lock() {
      let _ = writeln!(sink, "{}", line);
      let _ = sink.flush();
    }
  }
}

impl Default for Runner {
  fn default() -> Self {
    Self::new()
  }
}

enum WaitOutcome {
  Exited(ExitStatus),
  Cancelled,
}

/// Wait for the child to terminate, honoring the cancel flag if present
fn wait_for_exit(child: &mut Child, cancel: Option<&CancelFlag>) -> FerryResult<WaitOutcome> {
  let Some(flag) = cancel else {
    return Ok(WaitOutcome::Exited(child.wait()?));
  };

  loop {
    if flag.is_cancelled() {
      // Killing the child closes its pipe write ends, so the readers see
      // end-of-stream and stop.
      let _ = child.kill();
      child.wait()?;
      return Ok(WaitOutcome::Cancelled);
    }
    if let Some(status) = child.try_wait()? {
      return Ok(WaitOutcome::Exited(status));
    }
    thread::sleep(CANCEL_POLL_INTERVAL);
  }
}

/// Spawn a reader thread that drains one pipe to end-of-stream.
///
/// Each thread owns its own accumulator; chunks are appended in read order
/// and tee'd to the shared sink so output is visible while the command runs.
fn spawn_drain<R>(mut pipe: R, sink: DiagnosticSink) -> thread::JoinHandle<Vec<u8>>
where
  R: Read + Send + 'static,
{
  thread::spawn(move || {
    let mut captured = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];
    loop {
      match pipe.read(&mut chunk) {
        Ok(0) => break,
        Ok(n) => {
          captured.extend_from_slice(&chunk[..n]);
          // Mirroring is best-effort; a broken sink must not lose capture
          if let Ok(mut sink) = sink.lock() {
            let _ = sink.write_all(&chunk[..n]);
            let _ = sink.flush();
          }
        }
        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
        Err(_) => break,
      }
    }
    captured
  })
}

/// Join a reader thread, surfacing a panic as an error
fn join_reader(handle: thread::JoinHandle<Vec<u8>>) -> FerryResult<Vec<u8>> {
  handle
    .join()
    .map_err(|_| FerryError::message("Output reader thread panicked"))
}
