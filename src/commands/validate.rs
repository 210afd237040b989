//! # Validate Command Implementation
//!
//! Checks a resource's desired configuration against its composed field set
//! without projecting anything:
//!
//! - **Composition**: the policy's conflict partners must be defined fields.
//! - **Types**: every supplied value must match its field's type.
//! - **Required fields**: must be supplied.
//! - **Conflicts**: a field may not be supplied together with a field it
//!   conflicts with.
//!
//! This command is read-only.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use token_fields::output::{marker, Marker, OutputConfig};
use token_fields::schema::compose;
use token_fields::validate::validate;

use super::{load_fields, load_policy, load_state};

/// Validate a resource configuration
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Conflict policy file (YAML). Defaults to an empty policy.
    #[arg(short, long, value_name = "FILE", env = "TOKEN_FIELDS_POLICY")]
    pub policy: Option<PathBuf>,

    /// The resource's own field definitions (YAML map of name to schema).
    #[arg(short, long, value_name = "FILE")]
    pub fields: Option<PathBuf>,

    /// Resource state file (YAML or JSON).
    #[arg(short, long, value_name = "FILE")]
    pub state: PathBuf,
}

/// Execute the `validate` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);

    let policy = load_policy(args.policy.as_ref())?;
    let fields = load_fields(args.fields.as_ref())?;

    let composed = match compose(&fields, &policy) {
        Ok(composed) => {
            println!(
                "{} Composed {} field(s) ({} shared)",
                marker(&out, Marker::Ok),
                composed.len(),
                composed.len() - fields.len()
            );
            composed
        }
        Err(e) => {
            println!("{} Schema composition failed: {}", marker(&out, Marker::Err), e);
            return Err(anyhow::anyhow!("Schema composition failed: {}", e));
        }
    };

    let state = load_state(&args.state)?;
    let supplied = state.desired.len();
    if supplied == 0 {
        println!(
            "{} No values supplied in {}",
            marker(&out, Marker::Warn),
            args.state.display()
        );
    }

    match validate(&composed, &state, state.present_names()) {
        Ok(()) => {
            println!(
                "{} Configuration is valid ({} value(s) supplied)",
                marker(&out, Marker::Ok),
                supplied
            );
            Ok(())
        }
        Err(e) => {
            println!("{} {}", marker(&out, Marker::Err), e);
            Err(anyhow::anyhow!("Configuration validation failed: {}", e))
        }
    }
}
