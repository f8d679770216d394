//! Populating typed entities from loosely-typed JSON payloads.
//!
//! Every entity declares the JSON keys it understands in its
//! [`Hydrate::apply_field`] implementation. Keys outside that list are
//! dropped so that new upstream fields never break decoding, and keys
//! missing from a payload leave the current value in place.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Result, WistiaError};

/// Copy recognised fields from a decoded JSON object into `self`.
pub trait Hydrate {
    /// Apply a single `key`/`value` pair.
    ///
    /// Returns `false` when the key is not one of this type's fields.
    fn apply_field(&mut self, key: &str, value: &Value) -> bool;

    /// Apply every recognised key of `source`, in order.
    fn hydrate(&mut self, source: &Map<String, Value>) {
        for (key, value) in source {
            if !self.apply_field(key, value) {
                tracing::trace!(key = %key, "ignoring unrecognised field");
            }
        }
    }
}

/// Store `value` into `slot` if it decodes as `T`.
///
/// A value of the wrong JSON type leaves `slot` untouched. The return value
/// is always `true`: the key was recognised even if its value was not usable.
pub(crate) fn assign<T: DeserializeOwned>(slot: &mut T, key: &str, value: &Value) -> bool {
    match T::deserialize(value) {
        Ok(v) => *slot = v,
        Err(e) => tracing::debug!(key = %key, error = %e, "skipping field with unexpected type"),
    }
    true
}

/// Like [`assign`], for optional fields. JSON `null` clears the slot.
pub(crate) fn assign_opt<T: DeserializeOwned>(
    slot: &mut Option<T>,
    key: &str,
    value: &Value,
) -> bool {
    if value.is_null() {
        *slot = None;
        return true;
    }
    match T::deserialize(value) {
        Ok(v) => *slot = Some(v),
        Err(e) => tracing::debug!(key = %key, error = %e, "skipping field with unexpected type"),
    }
    true
}

/// Require a JSON object.
pub fn expect_object(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(WistiaError::UnexpectedShape { expected: "object" }),
    }
}

/// Require a JSON array.
pub fn expect_array(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        _ => Err(WistiaError::UnexpectedShape { expected: "array" }),
    }
}
