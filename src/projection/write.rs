//! Write projection
//!
//! Decides which shared token attribute values go into an outgoing create or
//! update request.
//!
//! For every attribute `A` with conflict set `C(A)`: if any member of `C(A)`
//! is present in the local configuration, `A` is skipped because the
//! resource-specific field takes precedence. Otherwise `A` is included when
//! the entry point's predicate holds:
//!
//! | entry point          | predicate                          |
//! |----------------------|------------------------------------|
//! | `project_for_create` | `A` was explicitly supplied        |
//! | `project_for_update` | `A` changed since the last sync    |
//! | `project_all`        | always                             |
//!
//! `token_no_default_policy` is always sent on create, as `false` when never
//! set, so the remote value is authoritative from the first write.
//! `token_type` always has a value on create: the explicit one, or the
//! policy's default.

use std::collections::BTreeMap;

use log::debug;

use crate::catalog::TokenField;
use crate::policy::ConflictPolicy;
use crate::state::LocalConfig;
use crate::value::FieldValue;

/// Attribute values to merge into an outgoing request, keyed by wire name.
pub type ValueBag = BTreeMap<String, FieldValue>;

/// Values to send when the resource is first created.
pub fn project_for_create<C>(config: &C, policy: &ConflictPolicy) -> ValueBag
where
    C: LocalConfig + ?Sized,
{
    let mut bag = ValueBag::new();

    for field in TokenField::ALL {
        let value = match field {
            TokenField::NoDefaultPolicy | TokenField::Type => {
                Some(value_or_zero(config, policy, field))
            }
            _ => config.get_if_present(field.name()),
        };

        let Some(value) = value else {
            continue;
        };

        if is_conflicted(config, policy, field) {
            continue;
        }

        bag.insert(field.name().to_string(), value);
    }

    bag
}

/// Values that changed since the last synchronized state.
///
/// An attribute that changed to "unset" is sent as its zero value (or the
/// token type default) so that the remote side clears it. Returns an empty
/// bag when nothing changed.
pub fn project_for_update<C>(config: &C, policy: &ConflictPolicy) -> ValueBag
where
    C: LocalConfig + ?Sized,
{
    let mut bag = ValueBag::new();

    for field in TokenField::ALL {
        if !config.has_change(field.name()) || is_conflicted(config, policy, field) {
            continue;
        }
        bag.insert(
            field.name().to_string(),
            value_or_zero(config, policy, field),
        );
    }

    bag
}

/// Every non-conflicted attribute with its effective value.
///
/// Used by resource kinds that rewrite the whole token configuration on every
/// write instead of sending a diff.
pub fn project_all<C>(config: &C, policy: &ConflictPolicy) -> ValueBag
where
    C: LocalConfig + ?Sized,
{
    TokenField::ALL
        .into_iter()
        .filter(|field| !is_conflicted(config, policy, *field))
        .map(|field| {
            (
                field.name().to_string(),
                value_or_zero(config, policy, field),
            )
        })
        .collect()
}

/// The first present partner that takes precedence over `field`, if any.
fn conflicting_partner<'p, C>(
    config: &C,
    policy: &'p ConflictPolicy,
    field: TokenField,
) -> Option<&'p str>
where
    C: LocalConfig + ?Sized,
{
    policy
        .conflicts_for(field)
        .iter()
        .map(String::as_str)
        .find(|partner| config.is_present(partner))
}

fn is_conflicted<C>(config: &C, policy: &ConflictPolicy, field: TokenField) -> bool
where
    C: LocalConfig + ?Sized,
{
    match conflicting_partner(config, policy, field) {
        Some(partner) => {
            debug!("Skipping {}: {} is set and takes precedence", field, partner);
            true
        }
        None => false,
    }
}

fn value_or_zero<C>(config: &C, policy: &ConflictPolicy, field: TokenField) -> FieldValue
where
    C: LocalConfig + ?Sized,
{
    config.get(field.name()).unwrap_or_else(|| match field {
        TokenField::Type => FieldValue::String(policy.token_type_default().to_string()),
        _ => FieldValue::zero(field.value_type()),
    })
}
