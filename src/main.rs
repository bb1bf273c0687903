mod commands;
mod core;
mod dist;
mod manifest;
mod utils;

use crate::core::error::{FerryError, print_error};
use clap::{Parser, Subcommand};

/// Release automation for Cargo packages
#[derive(Parser)]
#[command(name = "cargo")]
#[command(bin_name = "cargo")]
#[command(styles = get_styles())]
enum CargoCli {
  Ferry(FerryCli),
}

#[derive(Parser)]
#[command(name = "ferry")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct FerryCli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Package the crate into a distributable artifact
  Build,

  /// Upload a previously built artifact to the registry
  Publish {
    /// Registry token (injected into the upload tool's environment)
    #[arg(long)]
    token: String,
  },

  /// Print the next semantic version computed from the commit history
  NextVersion {
    /// Print the release tag instead of the bare version
    #[arg(long)]
    as_tag: bool,
    /// Output the result in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Set the manifest version explicitly
  SetVersion {
    /// The version to write (MAJOR.MINOR.PATCH)
    version: String,
  },

  /// Run the full release pipeline (version, stamp, build, upload)
  Release {
    /// Registry token; when omitted the upload step is skipped
    #[arg(long)]
    token: Option<String>,
    /// Output a release summary in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
}

fn main() {
  let CargoCli::Ferry(cli) = CargoCli::parse();

  let result = match cli.command {
    Commands::Build => commands::run_build(),
    Commands::Publish { token } => commands::run_publish(token),
    Commands::NextVersion { as_tag, json } => commands::run_next_version(as_tag, json),
    Commands::SetVersion { version } => commands::run_set_version(version),
    Commands::Release { token, json } => commands::run_release(token, json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: FerryError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
