//! CLI argument parsing and command dispatch

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::commands;

/// Token Fields - compose and project shared token attributes
#[derive(Parser, Debug)]
#[command(name = "token-fields")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compose the token fields with a resource's own fields and print them
    Schema(commands::schema::SchemaArgs),

    /// Print the token values a resource would send on create or update
    Project(commands::project::ProjectArgs),

    /// Extract the token values from a remote response
    Read(commands::read::ReadArgs),

    /// Check a resource configuration against its composed field set
    Validate(commands::validate::ValidateArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level)?;

        match self.command {
            Commands::Schema(args) => commands::schema::execute(args),
            Commands::Project(args) => commands::project::execute(args),
            Commands::Read(args) => commands::read::execute(args),
            Commands::Validate(args) => commands::validate::execute(args, &self.color),
        }
    }
}

/// Route library logs to stderr. `RUST_LOG` overrides `--log-level`.
fn init_logging(level: &str) -> Result<()> {
    let filter: log::LevelFilter = level
        .parse()
        .with_context(|| format!("Invalid log level: {level}"))?;

    env_logger::Builder::new()
        .filter_level(filter)
        .parse_default_env()
        .format_timestamp(None)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}
