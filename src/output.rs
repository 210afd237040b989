//! # Output Rendering
//!
//! Helpers the CLI uses to print field sets and value bags, and to prefix
//! status lines with a marker that respects the user's colour preference.
//!
//! Colour is decided once per invocation from the `--color` flag and the
//! environment:
//! - `--color=always|never` wins over everything else
//! - `NO_COLOR` (any value) or `CLICOLOR=0` disables colour
//! - `CLICOLOR_FORCE=1` enables colour even without a TTY
//! - `TERM=dumb` disables colour
//! - otherwise the terminal's own capabilities decide

use std::env;

use console::style;
use serde::Serialize;

use crate::error::Result;

/// Whether status markers are coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolve the colour setting from the `--color` flag value and the environment.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => detect_color_support(),
        };
        Self { use_color }
    }

    pub fn plain() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

fn detect_color_support() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
        return false;
    }
    if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
        return true;
    }
    if env::var("TERM").is_ok_and(|v| v == "dumb") {
        return false;
    }
    console::Term::stdout().features().colors_supported()
}

/// Kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Ok,
    Warn,
    Err,
}

impl Marker {
    fn label(self) -> &'static str {
        match self {
            Marker::Ok => "[OK]",
            Marker::Warn => "[WARN]",
            Marker::Err => "[ERR]",
        }
    }
}

/// The prefix for a status line: coloured when enabled, plain otherwise.
pub fn marker(config: &OutputConfig, kind: Marker) -> String {
    let label = kind.label();
    if !config.use_color {
        return label.to_string();
    }
    let styled = match kind {
        Marker::Ok => style(label).green(),
        Marker::Warn => style(label).yellow(),
        Marker::Err => style(label).red().bold(),
    };
    styled.force_styling(true).to_string()
}

/// Serialized document formats for field sets and value bags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

/// Serialize `value` as pretty JSON or YAML, with a trailing newline.
pub fn render<T: Serialize + ?Sized>(value: &T, format: DocumentFormat) -> Result<String> {
    let mut out = match format {
        DocumentFormat::Json => serde_json::to_string_pretty(value)?,
        DocumentFormat::Yaml => serde_yaml::to_string(value)?,
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}
