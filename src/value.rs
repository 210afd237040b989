//! Typed attribute values.
//!
//! `FieldValue` is the value of one attribute in a local configuration or an
//! outgoing payload. It is deserialized untagged so that YAML and JSON
//! documents can write plain scalars and lists.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Semantic type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Bool,
    Int,
    String,
    StringSet,
}

impl ValueType {
    /// The name used in error messages and rendered schemas.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::String => "string",
            ValueType::StringSet => "string_set",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    String(String),
    StringSet(BTreeSet<String>),
}

impl FieldValue {
    /// The zero value of a type: `false`, `0`, `""` or the empty set.
    pub fn zero(value_type: ValueType) -> Self {
        match value_type {
            ValueType::Bool => FieldValue::Bool(false),
            ValueType::Int => FieldValue::Int(0),
            ValueType::String => FieldValue::String(String::new()),
            ValueType::StringSet => FieldValue::StringSet(BTreeSet::new()),
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            FieldValue::Bool(_) => ValueType::Bool,
            FieldValue::Int(_) => ValueType::Int,
            FieldValue::String(_) => ValueType::String,
            FieldValue::StringSet(_) => ValueType::StringSet,
        }
    }

    /// Build a string set from anything yielding strings.
    pub fn string_set<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldValue::StringSet(items.into_iter().map(Into::into).collect())
    }

    /// Check that this value has the expected type.
    pub fn expect_type(&self, field: &str, expected: ValueType) -> Result<()> {
        if self.value_type() == expected {
            Ok(())
        } else {
            Err(Error::TypeMismatch {
                field: field.to_string(),
                expected: expected.to_string(),
                found: self.value_type().to_string(),
            })
        }
    }

    /// Coerce a JSON value returned by the remote system into `expected`.
    ///
    /// `Null` means the remote side holds no value and yields `Ok(None)`.
    /// Integral floats are accepted for ints; sets accept arrays of strings.
    pub fn from_json(
        field: &str,
        expected: ValueType,
        value: &serde_json::Value,
    ) -> Result<Option<Self>> {
        use serde_json::Value as Json;

        let mismatch = |found: &str| Error::TypeMismatch {
            field: field.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        };

        let coerced = match (expected, value) {
            (_, Json::Null) => return Ok(None),
            (ValueType::Bool, Json::Bool(b)) => FieldValue::Bool(*b),
            (ValueType::Int, Json::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else {
                    match n.as_f64() {
                        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                            FieldValue::Int(f as i64)
                        }
                        _ => return Err(mismatch("number")),
                    }
                }
            }
            (ValueType::String, Json::String(s)) => FieldValue::String(s.clone()),
            (ValueType::StringSet, Json::Array(items)) => {
                let mut set = BTreeSet::new();
                for item in items {
                    match item {
                        Json::String(s) => {
                            set.insert(s.clone());
                        }
                        other => return Err(mismatch(json_kind(other))),
                    }
                }
                FieldValue::StringSet(set)
            }
            (_, other) => return Err(mismatch(json_kind(other))),
        };

        Ok(Some(coerced))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::String(s) => write!(f, "{:?}", s),
            FieldValue::StringSet(set) => {
                let items: Vec<String> = set.iter().map(|s| format!("{:?}", s)).collect();
                write!(f, "[{}]", items.join(", "))
            }
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
