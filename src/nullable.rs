//! Tri-state field values
//!
//! `Nullable<T>` separates a field that was never given (`Unset`) from one
//! explicitly set to `null` (`Null`) and one carrying a value (`Present`).
//! A plain `Option<T>` folds the first two together, which loses the
//! difference between "leave this column alone" and "clear this column"
//! in a PATCH body.
//!
//! The enclosing struct decides whether an unset field reaches the output:
//!
//! ```
//! use nullable::Nullable;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct ContactPatch {
//!     #[serde(default, skip_serializing_if = "Nullable::is_unset")]
//!     telephone1: Nullable<String>,
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A value that is either unset, explicitly null, or present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Nullable<T> {
    /// Never assigned; absent from the input
    #[default]
    Unset,
    /// Explicitly assigned no value
    Null,
    /// Holds a concrete value
    Present(T),
}

impl<T> Nullable<T> {
    /// Create a present value
    pub fn new(value: T) -> Self {
        Self::Present(value)
    }

    /// Create an explicit null
    pub fn null() -> Self {
        Self::Null
    }

    /// Create an unset value, same as `Default::default()`
    pub fn unset() -> Self {
        Self::Unset
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Get the carried value, `None` for both null and unset
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Null | Self::Unset => None,
        }
    }

    /// Take the carried value, `None` for both null and unset
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Null | Self::Unset => None,
        }
    }

    pub fn as_ref(&self) -> Nullable<&T> {
        match self {
            Self::Unset => Nullable::Unset,
            Self::Null => Nullable::Null,
            Self::Present(value) => Nullable::Present(value),
        }
    }

    /// Transform the carried value, keeping null and unset as they are
    pub fn map<U, F>(self, f: F) -> Nullable<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Unset => Nullable::Unset,
            Self::Null => Nullable::Null,
            Self::Present(value) => Nullable::Present(f(value)),
        }
    }

    /// Convert to the nested option form
    ///
    /// `Unset` becomes `None`, `Null` becomes `Some(None)` and `Present(v)`
    /// becomes `Some(Some(v))`.
    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Self::Unset => None,
            Self::Null => Some(None),
            Self::Present(value) => Some(Some(value)),
        }
    }

    /// Merge into an existing optional value with PATCH semantics
    ///
    /// Unset leaves `target` untouched, null clears it and a present value
    /// replaces it.
    pub fn apply_to(self, target: &mut Option<T>) {
        match self {
            Self::Unset => {}
            Self::Null => *target = None,
            Self::Present(value) => *target = Some(value),
        }
    }
}

impl<T> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Self::Present(value)
    }
}

/// `None` maps to an explicit null, not to unset
impl<T> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Present(value),
            None => Self::Null,
        }
    }
}

impl<T> From<Option<Option<T>>> for Nullable<T> {
    fn from(value: Option<Option<T>>) -> Self {
        match value {
            None => Self::Unset,
            Some(None) => Self::Null,
            Some(Some(value)) => Self::Present(value),
        }
    }
}

// Unset serializes as null when reached; omitting it is up to the container.
impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Present(value) => serializer.serialize_some(value),
            Self::Null | Self::Unset => serializer.serialize_none(),
        }
    }
}

// Only called for keys that appear in the input, so the result is never Unset.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<T>::deserialize(deserializer)? {
            Some(value) => Ok(Self::Present(value)),
            None => Ok(Self::Null),
        }
    }
}
