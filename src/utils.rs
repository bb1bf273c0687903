//! Small shared helpers: shell quoting and status lines

/// Quote one argument for copy-paste into a POSIX shell.
///
/// Arguments made of safe characters pass through untouched; everything
/// else is single-quoted, with embedded single quotes escaped as `'\''`.
pub fn shell_quote(arg: &str) -> String {
  if arg.is_empty() {
    return "''".to_string();
  }

  let safe = arg.bytes().all(|b| {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.' | b'/' | b':' | b'=' | b'@' | b'%' | b'+' | b',')
  });

  if safe {
    arg.to_string()
  } else {
    format!("'{}'", arg.replace('\'', r"'\''"))
  }
}

/// Render an argument list as one copy-paste re-runnable shell line
pub fn shell_join(args: &[String]) -> String {
  args.iter().map(|arg| shell_quote(arg)).collect::<Vec<_>>().join(" ")
}

/// Print a pipeline status line to stderr
pub fn status(message: &str) {
  eprintln!("> {}", message);
}
