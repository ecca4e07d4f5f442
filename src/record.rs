//! Nullable fields on untyped JSON records
//!
//! Records coming back from the Web API are plain JSON objects. These helpers
//! read and write a single column with the same rules the serde attributes
//! `#[serde(default, skip_serializing_if = "Nullable::is_unset")]` give a
//! typed struct: a missing key is unset, `null` is null, and unset values are
//! never written.

use crate::nullable::Nullable;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// State of a record key, without decoding its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    Unset,
    Null,
    Present,
}

/// Classify a key of a record
pub fn field_state(record: &Map<String, Value>, key: &str) -> FieldState {
    match record.get(key) {
        None => FieldState::Unset,
        Some(Value::Null) => FieldState::Null,
        Some(_) => FieldState::Present,
    }
}

/// Read a column as a nullable value
///
/// Decoding errors are returned as-is so they fail the caller's whole read.
pub fn read_field<T>(record: &Map<String, Value>, key: &str) -> serde_json::Result<Nullable<T>>
where
    T: DeserializeOwned,
{
    let value = match record.get(key) {
        None => Nullable::Unset,
        Some(Value::Null) => Nullable::Null,
        Some(value) => Nullable::Present(T::deserialize(value)?),
    };

    log::trace!("Read field {}: {}", key, state_name(&value));
    Ok(value)
}

/// Write a column from a nullable value
///
/// Unset leaves the record untouched; null writes an explicit `null`.
pub fn write_field<T>(
    record: &mut Map<String, Value>,
    key: &str,
    value: &Nullable<T>,
) -> serde_json::Result<()>
where
    T: Serialize,
{
    match value {
        Nullable::Unset => {
            log::trace!("Skipped unset field {}", key);
        }
        Nullable::Null => {
            record.insert(key.to_string(), Value::Null);
            log::trace!("Wrote field {}: null", key);
        }
        Nullable::Present(inner) => {
            record.insert(key.to_string(), serde_json::to_value(inner)?);
            log::trace!("Wrote field {}: present", key);
        }
    }

    Ok(())
}

fn state_name<T>(value: &Nullable<T>) -> &'static str {
    match value {
        Nullable::Unset => "unset",
        Nullable::Null => "null",
        Nullable::Present(_) => "present",
    }
}
