//! # Error Handling
//!
//! This module defines the centralized error type for the `token-fields`
//! library. It uses the `thiserror` library to create an `Error` enum that
//! covers every failure the library can report, with a descriptive message
//! and, where it helps, a hint about how to fix the input.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Each variant corresponds to one kind of
//!   failure and carries the field name involved.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Projection itself never fails. Errors come from the edges: loading and
//! checking a conflict policy, composing a field set, validating a local
//! configuration, and coercing remote values into catalog types.

use thiserror::Error;

fn render_hint(hint: &Option<String>) -> String {
    hint.as_ref()
        .map(|h| format!("\n  hint: {}", h))
        .unwrap_or_default()
}

/// Main error type for token-fields operations
#[derive(Error, Debug)]
pub enum Error {
    /// A conflict policy is malformed.
    ///
    /// Raised while building or loading a policy, and while composing a
    /// field set whose policy names a conflict partner that does not exist.
    #[error("Conflict policy error for {field}: {message}{}", render_hint(hint))]
    Policy {
        field: String,
        message: String,
        /// Optional hint for how to fix the policy
        hint: Option<String>,
    },

    /// A field set could not be composed, or a configuration does not
    /// satisfy it (for example a required field is missing).
    #[error("Schema error for {field}: {message}")]
    Schema { field: String, message: String },

    /// A configuration supplies a field together with a field it conflicts with.
    #[error("\"{field}\": conflicts with {}", conflicts_with.join(", "))]
    Conflict {
        field: String,
        conflicts_with: Vec<String>,
    },

    /// A value does not have the type declared for its field.
    #[error("Type mismatch for {field}: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },

    /// A name is neither a shared attribute nor a declared field.
    #[error("Unknown field: {name}{}", render_hint(hint))]
    UnknownField {
        name: String,
        /// Optional "did you mean" hint
        hint: Option<String>,
    },

    /// The remote system returned no response for a read.
    ///
    /// Callers usually interpret this as "the resource no longer exists".
    #[error("Remote response missing: {context}")]
    MissingResponse { context: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
