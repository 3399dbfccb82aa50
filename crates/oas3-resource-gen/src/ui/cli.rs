use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use oas3_resource_gen::generator::MapStrategy;

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "oas3-resource-gen")]
#[command(author, version, about = "OpenAPI generator for resource meta-models")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from a resource meta-model
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate an OpenAPI document from a resource meta-model
  Generate(GenerateCommand),
}

#[derive(Args, Debug)]
pub struct GenerateCommand {
  /// Path to the meta-model JSON file
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Previously generated or hand-edited document whose summaries,
  /// descriptions and operation ids are kept
  #[arg(short, long, value_name = "FILE")]
  pub template: Option<PathBuf>,

  /// Output path; `.yaml`/`.yml` writes YAML, anything else JSON
  #[arg(short, long, value_name = "FILE")]
  pub output: PathBuf,

  /// Document title used when no template is given
  #[arg(long)]
  pub title: Option<String>,

  /// Document version used when no template is given
  #[arg(long, value_name = "VERSION")]
  pub api_version: Option<String>,

  /// Document description used when no template is given
  #[arg(long)]
  pub description: Option<String>,

  /// How map-typed attributes are rendered (erase-keys or additional-properties)
  #[arg(long, value_name = "STRATEGY", default_value = "erase-keys")]
  pub map_strategy: MapStrategy,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List all resources defined in the meta-model
  Resources {
    /// Path to the meta-model JSON file
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}
