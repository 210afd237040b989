//! # Schema Composition
//!
//! Resource kinds describe their user-facing configuration as a `FieldSet`:
//! a map from field name to `FieldSchema`. `compose` adds the nine shared
//! token attributes to a resource's own fields, tagging each with its type,
//! description, the conflict partners declared by the resource's
//! `ConflictPolicy`, and (for `token_type` only) the resolved default.
//!
//! Composition does not reject configurations. It only advertises conflict
//! sets; enforcing them is the job of the validation layer (see
//! `crate::validate`).
//!
//! ## Example
//!
//! ```
//! use token_fields::policy::ConflictPolicy;
//! use token_fields::schema::{compose, FieldSchema, FieldSet};
//! use token_fields::value::ValueType;
//!
//! let mut fields = FieldSet::new();
//! fields.insert(
//!     "lease_duration".to_string(),
//!     FieldSchema::optional(ValueType::Int, "Lease duration in seconds"),
//! );
//!
//! let policy = ConflictPolicy::builder()
//!     .conflicts(token_fields::catalog::TokenField::Ttl, ["lease_duration"])
//!     .build()
//!     .unwrap();
//!
//! let composed = compose(&fields, &policy).unwrap();
//! assert_eq!(composed.len(), 10);
//! assert_eq!(composed["token_ttl"].conflicts_with, vec!["lease_duration".to_string()]);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{catalog, TokenField};
use crate::error::{Error, Result};
use crate::policy::ConflictPolicy;
use crate::suggestions;
use crate::value::{FieldValue, ValueType};

/// Definition of one configuration field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default = "default_optional")]
    pub optional: bool,
    #[serde(default)]
    pub description: String,
    /// Fields that may not be supplied together with this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicts_with: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<FieldValue>,
}

fn default_optional() -> bool {
    true
}

impl FieldSchema {
    /// An optional field with no conflicts and no default.
    pub fn optional(value_type: ValueType, description: impl Into<String>) -> Self {
        Self {
            value_type,
            optional: true,
            description: description.into(),
            conflicts_with: Vec::new(),
            default: None,
        }
    }

    /// A required field.
    pub fn required(value_type: ValueType, description: impl Into<String>) -> Self {
        Self {
            optional: false,
            ..Self::optional(value_type, description)
        }
    }
}

/// A resource kind's field definitions, keyed by field name.
pub type FieldSet = BTreeMap<String, FieldSchema>;

/// The shared token fields for `policy`, without any resource fields.
///
/// Conflict partners are not checked here; `compose` does that against the
/// full field set.
pub fn token_fields(policy: &ConflictPolicy) -> FieldSet {
    catalog()
        .iter()
        .map(|def| {
            let default = match def.field {
                TokenField::Type => Some(FieldValue::String(policy.token_type_default().to_string())),
                _ => def.default_value(),
            };
            let schema = FieldSchema {
                value_type: def.value_type,
                optional: true,
                description: def.description.to_string(),
                conflicts_with: policy.conflicts_for(def.field).iter().cloned().collect(),
                default,
            };
            (def.name().to_string(), schema)
        })
        .collect()
}

/// Return a new field set containing `fields` plus the shared token fields.
///
/// Fails when `fields` already defines a shared attribute name, or when the
/// policy names a conflict partner that is not defined in the result.
pub fn compose(fields: &FieldSet, policy: &ConflictPolicy) -> Result<FieldSet> {
    let mut composed = fields.clone();

    for (name, schema) in token_fields(policy) {
        if composed.contains_key(&name) {
            return Err(Error::Schema {
                field: name,
                message: "field is already defined by the resource".to_string(),
            });
        }
        composed.insert(name, schema);
    }

    for (field, partners) in policy.iter() {
        for partner in partners {
            if !composed.contains_key(partner) {
                let resource_fields = fields.keys().map(String::as_str);
                return Err(Error::Policy {
                    field: field.name().to_string(),
                    message: format!("conflict partner '{}' is not a defined field", partner),
                    hint: suggestions::did_you_mean(partner, resource_fields),
                });
            }
        }
    }

    Ok(composed)
}

/// In-place variant of `compose`. On error `fields` is left untouched.
pub fn compose_into(fields: &mut FieldSet, policy: &ConflictPolicy) -> Result<()> {
    *fields = compose(fields, policy)?;
    Ok(())
}

/// Render a field set as an aligned, human-readable table.
pub fn describe(fields: &FieldSet) -> String {
    let width = fields.keys().map(String::len).max().unwrap_or(0);
    let mut out = String::new();

    for (name, schema) in fields {
        let mut line = format!("{:<width$}  {:<10}", name, schema.value_type.as_str());
        if !schema.optional {
            line.push_str("  required");
        }
        if let Some(default) = &schema.default {
            line.push_str(&format!("  default={}", default));
        }
        if !schema.conflicts_with.is_empty() {
            line.push_str(&format!("  conflicts_with={}", schema.conflicts_with.join(",")));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}
