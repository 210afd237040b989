//! # CLI Command Implementations
//!
//! One module per subcommand of the `token-fields` tool. Each module has an
//! `Args` struct derived with `clap` and an `execute` function that calls into
//! the `token_fields` library.
//!
//! The loaders shared by several commands live here.

pub mod project;
pub mod read;
pub mod schema;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;

use token_fields::output::DocumentFormat;
use token_fields::policy::ConflictPolicy;
use token_fields::schema::FieldSet;
use token_fields::state::ResourceState;

/// Serialized output format for machine-readable commands.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl From<Format> for DocumentFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => DocumentFormat::Json,
            Format::Yaml => DocumentFormat::Yaml,
        }
    }
}

/// Load the policy at `path`, or the empty policy when no path is given.
pub fn load_policy(path: Option<&PathBuf>) -> Result<ConflictPolicy> {
    match path {
        Some(path) => ConflictPolicy::from_file(path)
            .with_context(|| format!("Failed to load conflict policy: {}", path.display())),
        None => Ok(ConflictPolicy::empty()),
    }
}

/// Load a resource's own field definitions, or an empty set when no path is given.
pub fn load_fields(path: Option<&PathBuf>) -> Result<FieldSet> {
    let Some(path) = path else {
        return Ok(FieldSet::new());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read field definitions: {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse field definitions: {}", path.display()))
}

pub fn load_state(path: &Path) -> Result<ResourceState> {
    ResourceState::from_file(path)
        .with_context(|| format!("Failed to load resource state: {}", path.display()))
}
