//! # Local Configuration
//!
//! The projectors never own a resource's configuration; they read it through
//! the `LocalConfig` accessor contract supplied by whatever drives the
//! resource lifecycle. Every attribute is tri-state: never set, or set to a
//! value (an explicit `false` or `0` counts as set).
//!
//! `ResourceState` is an in-memory implementation used by the CLI and tests.
//! It keeps the user's desired configuration, the last state synchronized
//! with the remote system, and the defaults declared by the resource's
//! composed field set.
//!
//! Change detection compares the unset value of a shared attribute as the
//! value the remote system stores for it: the zero value of its type, or
//! the token type default for `token_type`. A value the remote side echoes
//! back unchanged is therefore never reported as a change.

use std::collections::BTreeMap;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::{TokenField, DEFAULT_TOKEN_TYPE};
use crate::error::{Error, Result};
use crate::projection::{ReadBag, ValueBag};
use crate::schema::FieldSet;
use crate::value::FieldValue;

/// Accessor contract over a resource instance's local configuration.
pub trait LocalConfig {
    /// Effective value: the explicit value, else the field's default, else `None`.
    fn get(&self, name: &str) -> Option<FieldValue>;

    /// The explicitly supplied value, ignoring defaults.
    fn get_if_present(&self, name: &str) -> Option<FieldValue>;

    /// Whether the effective value differs from the last synchronized value.
    ///
    /// An unset shared attribute compares as the value the remote side stores
    /// for it, so an echoed zero value is not a change.
    fn has_change(&self, name: &str) -> bool;

    fn is_present(&self, name: &str) -> bool {
        self.get_if_present(name).is_some()
    }
}

/// In-memory resource state with presence and change tracking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceState {
    /// Values the user supplied.
    #[serde(default)]
    pub desired: BTreeMap<String, FieldValue>,
    /// Values last synchronized with the remote system.
    #[serde(default)]
    pub synced: BTreeMap<String, FieldValue>,
    #[serde(skip)]
    defaults: BTreeMap<String, FieldValue>,
}

impl ResourceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the defaults declared in `fields` for unset values.
    pub fn with_defaults(mut self, fields: &FieldSet) -> Self {
        self.defaults = fields
            .iter()
            .filter_map(|(name, schema)| schema.default.clone().map(|d| (name.clone(), d)))
            .collect();
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        self.desired.insert(name.into(), value);
    }

    pub fn unset(&mut self, name: &str) -> Option<FieldValue> {
        self.desired.remove(name)
    }

    /// Record that the desired configuration has been written remotely.
    ///
    /// `sent` is the projected payload of the write. Its values win over the
    /// local ones, so attributes filled in by projection (such as
    /// `token_no_default_policy` and the token type default) are recorded as
    /// they were sent.
    pub fn mark_synced(&mut self, sent: &ValueBag) {
        let mut synced = self.effective();
        synced.extend(sent.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.synced = synced;
    }

    /// Value a shared attribute has when nothing is stored for it.
    ///
    /// Resource fields have no such value and compare as plain options.
    fn unset_value(&self, name: &str) -> Option<FieldValue> {
        match TokenField::from_name(name)? {
            TokenField::Type => Some(
                self.defaults
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| FieldValue::String(DEFAULT_TOKEN_TYPE.to_string())),
            ),
            field => Some(FieldValue::zero(field.value_type())),
        }
    }

    /// Persist a read projection as the new synchronized state.
    ///
    /// Values are coerced to the catalog types; `null` clears the entry.
    pub fn apply_read(&mut self, bag: &ReadBag) -> Result<()> {
        for (name, value) in bag {
            let field: TokenField = name.parse()?;
            match FieldValue::from_json(name, field.value_type(), value)? {
                Some(v) => {
                    self.synced.insert(name.clone(), v);
                }
                None => {
                    if self.synced.remove(name).is_some() {
                        debug!("Remote cleared {}", name);
                    }
                }
            }
        }
        Ok(())
    }

    /// Desired values with defaults filled in.
    pub fn effective(&self) -> BTreeMap<String, FieldValue> {
        let mut values = self.defaults.clone();
        values.extend(self.desired.iter().map(|(k, v)| (k.clone(), v.clone())));
        values
    }

    /// Names the user explicitly supplied.
    pub fn present_names(&self) -> impl Iterator<Item = &str> {
        self.desired.keys().map(String::as_str)
    }

    /// Parse a state document (YAML or JSON; JSON is valid YAML).
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(Error::Yaml)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        Self::from_yaml(&content)
    }
}

impl LocalConfig for ResourceState {
    fn get(&self, name: &str) -> Option<FieldValue> {
        self.desired
            .get(name)
            .or_else(|| self.defaults.get(name))
            .cloned()
    }

    fn get_if_present(&self, name: &str) -> Option<FieldValue> {
        self.desired.get(name).cloned()
    }

    fn has_change(&self, name: &str) -> bool {
        let local = self.get(name).or_else(|| self.unset_value(name));
        let synced = self
            .synced
            .get(name)
            .cloned()
            .or_else(|| self.unset_value(name));
        local != synced
    }
}
