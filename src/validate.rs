//! # Configuration Validation
//!
//! Enforces the metadata a composed `FieldSet` advertises: every supplied
//! value must match its declared type, required fields must be supplied, and
//! a field may not be supplied together with any field in its
//! `conflicts_with` list.
//!
//! Projection never calls this; it is the input-validation step that runs
//! before a configuration is accepted.

use crate::error::{Error, Result};
use crate::schema::FieldSet;
use crate::state::LocalConfig;
use crate::suggestions;

/// Validate the supplied field `names` of `config` against `fields`.
///
/// Checks run in a fixed order (unknown names, types, required fields,
/// conflicts) and the first failure is returned.
pub fn validate<'a, C, I>(fields: &FieldSet, config: &C, names: I) -> Result<()>
where
    C: LocalConfig + ?Sized,
    I: IntoIterator<Item = &'a str>,
{
    let names: Vec<&str> = names.into_iter().collect();

    for name in &names {
        let Some(schema) = fields.get(*name) else {
            return Err(Error::UnknownField {
                name: name.to_string(),
                hint: suggestions::did_you_mean(name, fields.keys().map(String::as_str)),
            });
        };
        if let Some(value) = config.get_if_present(name) {
            value.expect_type(name, schema.value_type)?;
        }
    }

    for (name, schema) in fields {
        if !schema.optional && !config.is_present(name) {
            return Err(Error::Schema {
                field: name.clone(),
                message: "required field is missing".to_string(),
            });
        }
    }

    for (name, schema) in fields {
        if !config.is_present(name) {
            continue;
        }
        let present: Vec<String> = schema
            .conflicts_with
            .iter()
            .filter(|partner| config.is_present(partner))
            .cloned()
            .collect();
        if !present.is_empty() {
            return Err(Error::Conflict {
                field: name.clone(),
                conflicts_with: present,
            });
        }
    }

    Ok(())
}
