//! # Read Command Implementation
//!
//! Reads a remote response body (JSON) and prints the nine token attributes
//! it carries. With `--state`, the values are instead persisted into the
//! state document's `synced` section and the updated state is printed.
//!
//! A response file containing `null` stands for "no response": the resource
//! no longer exists remotely.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use token_fields::output::render;
use token_fields::projection::{project, RemoteResponse};

use super::{load_state, Format};

/// Extract token values from a remote response
#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Remote response body (JSON object, or `null`).
    #[arg(short, long, value_name = "FILE")]
    pub response: PathBuf,

    /// Resource state file to update with the read values.
    #[arg(short, long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value = "json")]
    pub format: Format,
}

/// Execute the `read` command.
pub fn execute(args: ReadArgs) -> Result<()> {
    let content = std::fs::read_to_string(&args.response)
        .with_context(|| format!("Failed to read response: {}", args.response.display()))?;
    let body: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse response: {}", args.response.display()))?;

    let response: Option<RemoteResponse> = match body {
        serde_json::Value::Null => None,
        serde_json::Value::Object(map) => Some(map),
        _ => bail!("Response must be a JSON object or null"),
    };

    let bag = project(response.as_ref())?;

    match args.state {
        Some(path) => {
            let mut state = load_state(&path)?;
            state.apply_read(&bag)?;
            print!("{}", render(&state, args.format.into())?);
        }
        None => print!("{}", render(&bag, args.format.into())?),
    }

    Ok(())
}
