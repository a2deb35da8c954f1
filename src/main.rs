mod build;
mod commands;
mod core;
mod package;
mod publish;
mod registry;
mod release;

use clap::{Parser, Subcommand};
use crate::core::error::{ReleaseError, print_error};
use std::path::PathBuf;

/// Build, package and publish release artifacts across the platform matrix
#[derive(Parser)]
#[command(name = "sn-release")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Override the staging root for compiled artifacts
  #[arg(long, global = true)]
  staging: Option<PathBuf>,

  /// Override the output root for packaged archives
  #[arg(long, global = true)]
  output: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Compile binaries for one target platform and stage the artifacts
  Build {
    /// Target triple to build for (must be in the target matrix)
    #[arg(long)]
    platform: String,
    /// Binary to build (repeatable; default: every registered binary)
    #[arg(long = "binary")]
    binaries: Vec<String>,
  },

  /// Package one binary's staged artifacts into zip + tar.gz archives
  #[command(disable_version_flag = true)]
  Package {
    /// Name of the binary to package
    binary: String,
    /// Version to stamp into archive names (default: read from the component manifest)
    #[arg(long)]
    version: Option<String>,
    /// Output archive paths in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Resolve a release commit message into (component, version) pairs
  ResolveTags {
    /// The release commit message, e.g. "chore(release): sn_node-v1.2.3/sn_cli-v4.5.6"
    commit_message: String,
    /// Output pairs in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Upload packaged archives to GitHub releases and S3
  Publish {
    /// The release commit message naming the version-bumped components
    commit_message: String,
    /// GitHub repository receiving release assets (owner/name)
    #[arg(long)]
    repo: Option<String>,
    /// Plan the uploads without contacting any destination
    #[arg(long)]
    dry_run: bool,
    /// Output the publish report in JSON format
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
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let working_dir = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  // Load the tables once (release.toml override or built-in defaults) and
  // pass them explicitly into every command
  let mut config = match crate::core::config::ReleaseConfig::load_or_default(&working_dir) {
    Ok(config) => config,
    Err(e) => handle_error(e),
  };

  if let Some(staging) = cli.staging {
    config.staging_root = staging;
  }
  if let Some(output) = cli.output {
    config.output_root = output;
  }

  let result = match cli.command {
    Commands::Build { platform, binaries } => commands::run_build(&config, &platform, binaries),
    Commands::Package { binary, version, json } => commands::run_package(&config, &binary, version, json),
    Commands::ResolveTags { commit_message, json } => commands::run_resolve_tags(&commit_message, json),
    Commands::Publish {
      commit_message,
      repo,
      dry_run,
      json,
    } => {
      if let Some(repo) = repo {
        config.repo = repo;
        if let Err(e) = config.validate() {
          handle_error(e);
        }
      }
      commands::run_publish(&config, &commit_message, dry_run, json)
    }
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ReleaseError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
