//! # Schema Command Implementation
//!
//! Composes the shared token fields with a resource's own field definitions
//! under a conflict policy, and prints the result. Composition errors (for
//! example a conflict partner that the resource never defines) are reported
//! here, before any configuration is ever projected.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use token_fields::output::{render, DocumentFormat};
use token_fields::schema::{compose, describe};

use super::{load_fields, load_policy};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Table,
    Json,
    Yaml,
}

/// Print the composed field set
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Conflict policy file (YAML). Defaults to an empty policy.
    #[arg(short, long, value_name = "FILE", env = "TOKEN_FIELDS_POLICY")]
    pub policy: Option<PathBuf>,

    /// The resource's own field definitions (YAML map of name to schema).
    #[arg(short, long, value_name = "FILE")]
    pub fields: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value = "table")]
    pub format: SchemaFormat,
}

/// Execute the `schema` command.
pub fn execute(args: SchemaArgs) -> Result<()> {
    let policy = load_policy(args.policy.as_ref())?;
    let fields = load_fields(args.fields.as_ref())?;
    let composed = compose(&fields, &policy).context("Schema composition failed")?;

    let output = match args.format {
        SchemaFormat::Table => describe(&composed),
        SchemaFormat::Json => render(&composed, DocumentFormat::Json)?,
        SchemaFormat::Yaml => render(&composed, DocumentFormat::Yaml)?,
    };
    print!("{}", output);

    Ok(())
}
