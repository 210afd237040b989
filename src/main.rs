//! # Token Fields CLI
//!
//! Binary entry point for the `token-fields` command-line tool. It inspects
//! conflict policies, composes field sets, and shows what a resource would
//! send to or read from the remote system.
//!
//! The logic lives in the library crate; the binary only parses arguments,
//! sets up logging, and prints results.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
