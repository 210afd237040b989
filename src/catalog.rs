//! # Token Attribute Catalog
//!
//! The fixed group of token issuance attributes shared by every resource kind
//! that issues tokens. The catalog is a process-wide constant: the nine
//! definitions never change at runtime and are safe to read from any thread.
//!
//! Wire names are used identically as local field names and as keys in the
//! remote system's responses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;
use crate::suggestions;
use crate::value::{FieldValue, ValueType};

/// Token type used when a policy does not override it.
pub const DEFAULT_TOKEN_TYPE: &str = "default";

/// One of the nine shared token attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenField {
    BoundCidrs,
    MaxTtl,
    Ttl,
    ExplicitMaxTtl,
    NoDefaultPolicy,
    Period,
    Policies,
    Type,
    NumUses,
}

impl TokenField {
    /// Every attribute, in catalog order.
    pub const ALL: [TokenField; 9] = [
        TokenField::BoundCidrs,
        TokenField::MaxTtl,
        TokenField::Ttl,
        TokenField::ExplicitMaxTtl,
        TokenField::NoDefaultPolicy,
        TokenField::Period,
        TokenField::Policies,
        TokenField::Type,
        TokenField::NumUses,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TokenField::BoundCidrs => "token_bound_cidrs",
            TokenField::MaxTtl => "token_max_ttl",
            TokenField::Ttl => "token_ttl",
            TokenField::ExplicitMaxTtl => "token_explicit_max_ttl",
            TokenField::NoDefaultPolicy => "token_no_default_policy",
            TokenField::Period => "token_period",
            TokenField::Policies => "token_policies",
            TokenField::Type => "token_type",
            TokenField::NumUses => "token_num_uses",
        }
    }

    pub fn value_type(&self) -> ValueType {
        self.definition().value_type
    }

    /// The catalog entry for this attribute.
    pub fn definition(&self) -> &'static AttributeDefinition {
        &CATALOG[*self as usize]
    }

    /// Whether a conflict policy may declare partners for this attribute.
    ///
    /// `token_no_default_policy` and `token_type` are always sent and never
    /// yield to a resource-specific field.
    pub fn accepts_conflicts(&self) -> bool {
        !matches!(self, TokenField::NoDefaultPolicy | TokenField::Type)
    }

    /// Look up a wire name, returning `None` for names outside the catalog.
    pub fn from_name(name: &str) -> Option<TokenField> {
        TokenField::ALL.iter().copied().find(|f| f.name() == name)
    }
}

impl fmt::Display for TokenField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TokenField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TokenField::from_name(s).ok_or_else(|| Error::UnknownField {
            name: s.to_string(),
            hint: Some(suggestions::unknown_token_field(s)),
        })
    }
}

impl Serialize for TokenField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for TokenField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Immutable definition of a shared attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDefinition {
    pub field: TokenField,
    pub value_type: ValueType,
    /// Human-readable description advertised in composed schemas.
    pub description: &'static str,
    /// Catalog default. Only `token_type` has one, and a policy may override it.
    pub default: Option<&'static str>,
}

impl AttributeDefinition {
    pub fn name(&self) -> &'static str {
        self.field.name()
    }

    /// Default value as a typed value, if the attribute has one.
    pub fn default_value(&self) -> Option<FieldValue> {
        self.default.map(|s| FieldValue::String(s.to_string()))
    }
}

// Indexed by `TokenField as usize`; order must follow `TokenField::ALL`.
static CATALOG: [AttributeDefinition; 9] = [
    AttributeDefinition {
        field: TokenField::BoundCidrs,
        value_type: ValueType::StringSet,
        description:
            "Specifies the blocks of IP addresses which are allowed to use the generated token",
        default: None,
    },
    AttributeDefinition {
        field: TokenField::MaxTtl,
        value_type: ValueType::Int,
        description: "The maximum lifetime of the generated token",
        default: None,
    },
    AttributeDefinition {
        field: TokenField::Ttl,
        value_type: ValueType::Int,
        description: "The initial ttl of the token to generate in seconds",
        default: None,
    },
    AttributeDefinition {
        field: TokenField::ExplicitMaxTtl,
        value_type: ValueType::Int,
        description: "Generated Token's Explicit Maximum TTL in seconds",
        default: None,
    },
    AttributeDefinition {
        field: TokenField::NoDefaultPolicy,
        value_type: ValueType::Bool,
        description:
            "If true, the 'default' policy will not automatically be added to generated tokens",
        default: None,
    },
    AttributeDefinition {
        field: TokenField::Period,
        value_type: ValueType::Int,
        description: "Generated Token's Period",
        default: None,
    },
    AttributeDefinition {
        field: TokenField::Policies,
        value_type: ValueType::StringSet,
        description: "Generated Token's Policies",
        default: None,
    },
    AttributeDefinition {
        field: TokenField::Type,
        value_type: ValueType::String,
        description: "The type of token to generate, service or batch",
        default: Some(DEFAULT_TOKEN_TYPE),
    },
    AttributeDefinition {
        field: TokenField::NumUses,
        value_type: ValueType::Int,
        description:
            "The maximum number of times a token may be used, a value of zero means unlimited",
        default: None,
    },
];

/// The nine shared attribute definitions, in catalog order.
pub fn catalog() -> &'static [AttributeDefinition] {
    &CATALOG
}
