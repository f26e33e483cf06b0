use std::path::PathBuf;

use clap::{Parser, Subcommand};
use oas3_docs_core::SlugOptions;

use super::colors::{ColorMode, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "oas3-docs")]
#[command(author, version, about = "OpenAPI reference preprocessor")]
#[command(styles = super::Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false, global = true, conflicts_with = "quiet")]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false, global = true)]
  pub quiet: bool,

  /// Split camelCase words when building operation slugs (getUserById -> get-user-by-id)
  #[arg(long, default_value_t = false, global = true)]
  pub decamelize: bool,
}

impl Cli {
  #[must_use]
  pub fn slug_options(&self) -> SlugOptions {
    SlugOptions {
      decamelize: self.decamelize,
    }
  }

  /// Default `tracing` filter when `RUST_LOG` is unset.
  #[must_use]
  pub fn log_level(&self) -> &'static str {
    if self.verbose {
      "debug"
    } else if self.quiet {
      "error"
    } else {
      "warn"
    }
  }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from OpenAPI specification
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Print the sidebar navigation tree as JSON
  Sidebar {
    /// Path to the OpenAPI JSON or YAML specification file
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
  /// Write the enhanced JSON artifact served to the documentation UI
  Build {
    /// Path to the OpenAPI JSON or YAML specification file
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Path where the enhanced JSON document will be written
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Embed the precomputed sidebar as `x-sidebar`
    #[arg(long, default_value_t = false)]
    with_sidebar: bool,
  },
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List all operations with the routes the UI addresses them by
  Operations {
    /// Path to the OpenAPI JSON or YAML specification file
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}
