//! Read projection
//!
//! Copies the shared token attributes out of a remote response. The remote
//! system has already resolved conflicts, so every attribute is copied as-is;
//! a key missing from the response is reported as `null`.

use std::collections::BTreeMap;

use log::debug;

use crate::catalog::TokenField;
use crate::error::{Error, Result};

/// A response body from the remote system. Only the nine catalog keys are read.
pub type RemoteResponse = serde_json::Map<String, serde_json::Value>;

/// The nine attribute values from a remote response, keyed by wire name.
pub type ReadBag = BTreeMap<String, serde_json::Value>;

/// Extract the shared token attributes from `response`.
///
/// `None` means the remote system returned nothing for the read, which the
/// caller usually treats as "the resource no longer exists".
pub fn project(response: Option<&RemoteResponse>) -> Result<ReadBag> {
    let response = response.ok_or_else(|| Error::MissingResponse {
        context: "token fields read".to_string(),
    })?;

    Ok(TokenField::ALL
        .iter()
        .map(|field| {
            let value = response.get(field.name()).cloned().unwrap_or_else(|| {
                debug!("Remote response has no {}", field);
                serde_json::Value::Null
            });
            (field.name().to_string(), value)
        })
        .collect())
}
