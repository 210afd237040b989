//! # Conflict Policies
//!
//! A `ConflictPolicy` is declared once per resource kind. For each shared
//! attribute it lists the resource-specific fields that take precedence over
//! it: when one of those fields is present in a local configuration, the
//! shared attribute is left out of outgoing writes. The policy also carries
//! the resource kind's default token type.
//!
//! Policies can be built in code or loaded from YAML:
//!
//! ```yaml
//! token_type_default: service
//! conflicts:
//!   token_ttl: [ttl]
//!   token_policies: [policies]
//! ```
//!
//! Malformed policies are rejected when they are built, never at projection
//! time. Whether each conflict partner actually exists in the resource's
//! field set is checked later, by `schema::compose`.
//!
//! ## Example
//!
//! ```
//! use token_fields::catalog::TokenField;
//! use token_fields::policy::ConflictPolicy;
//!
//! let policy = ConflictPolicy::builder()
//!     .conflicts(TokenField::Ttl, ["ttl"])
//!     .token_type_default("service")
//!     .build()
//!     .unwrap();
//!
//! assert!(policy.conflicts_for(TokenField::Ttl).contains("ttl"));
//! assert!(policy.conflicts_for(TokenField::MaxTtl).is_empty());
//! assert_eq!(policy.token_type_default(), "service");
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::LazyLock;

use log::warn;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::catalog::{TokenField, DEFAULT_TOKEN_TYPE};
use crate::error::{Error, Result};

/// Token types the remote system understands.
const KNOWN_TOKEN_TYPES: [&str; 5] = [
    "default",
    "service",
    "batch",
    "default-service",
    "default-batch",
];

/// Pattern every conflict partner name must match.
static FIELD_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9_]*$").expect("field name pattern is a valid regex")
});

static EMPTY: BTreeSet<String> = BTreeSet::new();

/// Per-resource-kind conflict declarations. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConflictPolicy {
    conflicts: BTreeMap<TokenField, BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token_type_default: Option<String>,
}

impl ConflictPolicy {
    /// A policy with no conflicts and the catalog's token type default.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> ConflictPolicyBuilder {
        ConflictPolicyBuilder::default()
    }

    /// The fields that take precedence over `field`. Empty when none are declared.
    pub fn conflicts_for(&self, field: TokenField) -> &BTreeSet<String> {
        self.conflicts.get(&field).unwrap_or(&EMPTY)
    }

    /// Iterate over every attribute that declares at least one partner.
    pub fn iter(&self) -> impl Iterator<Item = (TokenField, &BTreeSet<String>)> {
        self.conflicts
            .iter()
            .filter(|(_, partners)| !partners.is_empty())
            .map(|(field, partners)| (*field, partners))
    }

    /// The resolved default for `token_type`.
    pub fn token_type_default(&self) -> &str {
        self.token_type_default
            .as_deref()
            .unwrap_or(DEFAULT_TOKEN_TYPE)
    }

    /// Parse a policy from a YAML document.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let raw: PolicyFile = serde_yaml::from_str(content)?;
        raw.into_policy()
    }

    /// Read and parse a policy file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        Self::from_yaml(&content)
    }
}

/// On-disk shape of a policy. Keys are kept as strings so that a misspelled
/// attribute gets a hint instead of a bare serde error.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyFile {
    #[serde(default)]
    token_type_default: Option<String>,
    #[serde(default)]
    conflicts: BTreeMap<String, Vec<String>>,
}

impl PolicyFile {
    fn into_policy(self) -> Result<ConflictPolicy> {
        let mut builder = ConflictPolicy::builder();
        for (name, partners) in self.conflicts {
            let field: TokenField = name.parse()?;
            builder = builder.conflicts(field, partners);
        }
        if let Some(default) = self.token_type_default {
            builder = builder.token_type_default(default);
        }
        builder.build()
    }
}

/// Builder for `ConflictPolicy`; all checks run in `build`.
#[derive(Debug, Default)]
pub struct ConflictPolicyBuilder {
    conflicts: Vec<(TokenField, Vec<String>)>,
    token_type_default: Option<String>,
}

impl ConflictPolicyBuilder {
    /// Declare fields that take precedence over `field`. Repeated calls for
    /// the same attribute accumulate.
    pub fn conflicts<I, S>(mut self, field: TokenField, partners: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conflicts
            .push((field, partners.into_iter().map(Into::into).collect()));
        self
    }

    /// Override the `token_type` default. An empty string keeps the catalog default.
    pub fn token_type_default(mut self, default: impl Into<String>) -> Self {
        self.token_type_default = Some(default.into());
        self
    }

    pub fn build(self) -> Result<ConflictPolicy> {
        let mut conflicts: BTreeMap<TokenField, BTreeSet<String>> = BTreeMap::new();

        for (field, partners) in self.conflicts {
            if !field.accepts_conflicts() {
                return Err(Error::Policy {
                    field: field.name().to_string(),
                    message: "this attribute cannot declare conflicts".to_string(),
                    hint: Some(format!("Remove '{}' from the conflicts map", field)),
                });
            }

            if partners.is_empty() {
                warn!("Conflict list for {} is empty; ignoring it", field);
            }

            let entry = conflicts.entry(field).or_default();
            for partner in partners {
                check_partner(field, &partner)?;
                entry.insert(partner);
            }
        }

        let token_type_default = self.token_type_default.filter(|s| !s.is_empty());
        if let Some(default) = &token_type_default {
            if !KNOWN_TOKEN_TYPES.contains(&default.as_str()) {
                warn!(
                    "token_type default '{}' is not one of: {}",
                    default,
                    KNOWN_TOKEN_TYPES.join(", ")
                );
            }
        }

        conflicts.retain(|_, partners| !partners.is_empty());

        Ok(ConflictPolicy {
            conflicts,
            token_type_default,
        })
    }
}

fn check_partner(field: TokenField, partner: &str) -> Result<()> {
    if partner == field.name() {
        return Err(Error::Policy {
            field: field.name().to_string(),
            message: "an attribute cannot conflict with itself".to_string(),
            hint: None,
        });
    }

    if TokenField::from_name(partner).is_some() {
        return Err(Error::Policy {
            field: field.name().to_string(),
            message: format!(
                "'{}' is a shared token attribute; shared attributes never conflict with each other",
                partner
            ),
            hint: Some("List the resource-specific field that replaces it instead".to_string()),
        });
    }

    if !FIELD_NAME.is_match(partner) {
        return Err(Error::Policy {
            field: field.name().to_string(),
            message: format!("'{}' is not a valid field name", partner),
            hint: Some("Field names are lowercase snake_case identifiers".to_string()),
        });
    }

    Ok(())
}
