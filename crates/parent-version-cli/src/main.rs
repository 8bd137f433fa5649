//! parent-version CLI tool.
//!
//! Usage:
//! ```bash
//! parent-version check [OPTIONS] [--properties FILE]
//! parent-version list-rules
//! parent-version init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Checks that a module's version is consistent with its parent's
#[derive(Parser)]
#[command(name = "parent-version")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (shows the rule's debug lines)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file (default: looked up beside the properties file)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the enabled rules against an artifact's properties
    Check {
        /// TOML file holding the artifact's build properties
        #[arg(short, long, default_value = "properties.toml")]
        properties: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Check { properties, format } => {
            let source = config_resolver::resolve(&properties, cli.config.as_deref());
            commands::check::run(&properties, format, &source)
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
