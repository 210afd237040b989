//! # Token Fields Library
//!
//! Many resource kinds issue tokens, and all of them share the same group of
//! token attributes (`token_ttl`, `token_policies`, ...). This library
//! declares that group once and lets each resource kind say which shared
//! attributes must yield to its own, resource-specific fields.
//!
//! ## Quick Example
//!
//! ```
//! use token_fields::catalog::TokenField;
//! use token_fields::policy::ConflictPolicy;
//! use token_fields::projection::project_for_create;
//! use token_fields::schema::{compose, FieldSchema, FieldSet};
//! use token_fields::state::ResourceState;
//! use token_fields::value::{FieldValue, ValueType};
//!
//! // The resource's own fields, plus its conflict policy
//! let mut fields = FieldSet::new();
//! fields.insert(
//!     "lease_duration".to_string(),
//!     FieldSchema::optional(ValueType::Int, "Lease duration in seconds"),
//! );
//! let policy = ConflictPolicy::builder()
//!     .conflicts(TokenField::Ttl, ["lease_duration"])
//!     .build()
//!     .unwrap();
//! let fields = compose(&fields, &policy).unwrap();
//!
//! // A configured instance
//! let mut state = ResourceState::new().with_defaults(&fields);
//! state.set("lease_duration", FieldValue::Int(600));
//! state.set("token_ttl", FieldValue::Int(60));
//! state.set("token_policies", FieldValue::string_set(["admin"]));
//!
//! // lease_duration takes precedence over token_ttl
//! let payload = project_for_create(&state, &policy);
//! assert!(!payload.contains_key("token_ttl"));
//! assert!(payload.contains_key("token_policies"));
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Composition** (`schema`): at definition time a resource kind composes
//!    its field set with the shared token fields under its `ConflictPolicy`.
//! 2. **Validation** (`validate`): user input is checked against the
//!    composed field set, including mutual exclusion of conflicting fields.
//! 3. **Write projection** (`projection::write`): before a create or update
//!    call, the values to send are selected from the local configuration.
//! 4. **Read projection** (`projection::read`): after a read call, the shared
//!    attributes are copied out of the remote response and persisted as the
//!    synchronized state (`state`).
//!
//! Nothing here performs I/O except the file loaders, and nothing holds
//! state between calls.

pub mod catalog;
pub mod error;
pub mod output;
pub mod policy;
pub mod projection;
pub mod schema;
pub mod state;
pub mod suggestions;
pub mod validate;
pub mod value;

#[cfg(test)]
mod projection_proptest;
