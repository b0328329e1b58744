mod cmd;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::{cmd_entries, cmd_render};
use crate::output::{OutputFormat, print_error};

/// entrypage - Generate an HTML page for every build entry point
#[derive(Parser)]
#[command(name = "entrypage")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Render the entry pages of a compilation snapshot
  Render {
    /// Path to the compilation snapshot (JSON)
    snapshot: PathBuf,

    /// Directory the pages are written to
    #[arg(long, default_value = "dist")]
    out: PathBuf,

    /// Render every page before failing, reporting all renderer failures
    #[arg(long)]
    collect_errors: bool,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    format: OutputFormat,
  },

  /// List entry points with their template module and assets
  Entries {
    /// Path to the compilation snapshot (JSON)
    snapshot: PathBuf,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    format: OutputFormat,
  },
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "info" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Render {
      snapshot,
      out,
      collect_errors,
      format,
    } => cmd_render(&snapshot, &out, collect_errors, format),
    Commands::Entries { snapshot, format } => cmd_entries(&snapshot, format),
  };

  if let Err(err) = result {
    print_error(&format!("{:#}", err));
    std::process::exit(1);
  }
}
