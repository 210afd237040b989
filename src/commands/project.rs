//! # Project Command Implementation
//!
//! Loads a resource state document and prints the token values that would be
//! merged into an outgoing create or update request.
//!
//! A state document holds the user's `desired` values and the last `synced`
//! values:
//!
//! ```yaml
//! desired:
//!   lease_duration: 600
//!   token_ttl: 60
//! synced:
//!   token_ttl: 30
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use log::info;

use token_fields::output::render;
use token_fields::projection::{project_all, project_for_create, project_for_update};
use token_fields::schema::token_fields;

use super::{load_policy, load_state, Format};

/// Which write is being prepared.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Initial creation: values the user supplied
    Create,
    /// Incremental update: values changed since the last sync
    Update,
    /// Full rewrite: every non-conflicted value
    All,
}

/// Print the token values to send to the remote system
#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Conflict policy file (YAML). Defaults to an empty policy.
    #[arg(short, long, value_name = "FILE", env = "TOKEN_FIELDS_POLICY")]
    pub policy: Option<PathBuf>,

    /// Resource state file (YAML or JSON).
    #[arg(short, long, value_name = "FILE")]
    pub state: PathBuf,

    /// Which write to prepare.
    #[arg(short, long, value_enum, default_value = "create")]
    pub mode: Mode,

    /// Output format.
    #[arg(long, value_enum, default_value = "json")]
    pub format: Format,
}

/// Execute the `project` command.
pub fn execute(args: ProjectArgs) -> Result<()> {
    let policy = load_policy(args.policy.as_ref())?;
    let state = load_state(&args.state)?.with_defaults(&token_fields(&policy));

    let bag = match args.mode {
        Mode::Create => project_for_create(&state, &policy),
        Mode::Update => project_for_update(&state, &policy),
        Mode::All => project_all(&state, &policy),
    };
    info!("Projected {} token field(s) for {:?}", bag.len(), args.mode);

    print!("{}", render(&bag, args.format.into())?);
    Ok(())
}
