//! Top-level argument definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::check::CheckArgs;
use crate::cli::commands::completions::CompletionsArgs;
use crate::cli::commands::generate::GenerateArgs;
use crate::cli::commands::graph::GraphArgs;
use crate::cli::commands::parts::PartsArgs;
use crate::cli::commands::stats::StatsArgs;
use crate::core::WeaponClass;

#[derive(Parser, Debug)]
#[command(
    name = "partforge",
    version,
    about = "Compose weapon parts into builds that meet stat thresholds",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Catalog JSON file (repeatable, loaded in order)
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Vec<PathBuf>,

    /// Directory of catalog JSON files
    #[arg(long, global = true, value_name = "DIR", conflicts_with = "catalog")]
    pub catalog_dir: Option<PathBuf>,

    /// Config file (default: ./partforge.yaml, then the user config dir)
    #[arg(long, global = true, value_name = "FILE", env = "PARTFORGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for the first build meeting the thresholds
    Generate(GenerateArgs),

    /// List catalog parts
    Parts(PartsArgs),

    /// Compute the stat profile of specific parts
    Stats(StatsArgs),

    /// Show the compatibility graph
    Graph(GraphArgs),

    /// Load and validate the catalog
    Check(CheckArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

/// Output format for command results
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Text for single results, table for lists
    #[default]
    Auto,
    /// Human-readable text
    Text,
    /// Boxed table
    Table,
    /// JSON
    Json,
    /// YAML
    Yaml,
    /// Comma-separated values
    Csv,
    /// Tab-separated values
    Tsv,
}

/// Parse a weapon class argument
///
/// Known classes match case-insensitively. Clap would otherwise pick the
/// exact-match `From<String>` conversion used for catalog data.
pub fn parse_class(s: &str) -> Result<WeaponClass, String> {
    s.parse()
}
