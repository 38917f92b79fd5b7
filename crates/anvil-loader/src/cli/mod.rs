/// Command-line interface module for the Anvil loader.
pub mod commands;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI configuration structure.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file layered over the built-in defaults
    #[arg(long, global = true, env = "ANVIL_CONFIG")]
    pub config: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Load components and print them
    Load {
        /// Components directory, overrides loader.components_path
        #[arg(long)]
        path: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
    /// Report malformed documents and unreadable files
    Check {
        /// Components directory, overrides loader.components_path
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

/// Output format of the `load` command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

/// Parses command-line arguments into the Cli structure.
pub fn parse_cli() -> Cli {
    Cli::parse()
}
