//! Presence-tracking field wrapper for partial updates.
//!
//! JSON bodies distinguish three cases for every field: the key is missing,
//! the key is `null`, or the key carries a value. `FieldPatch` keeps all three
//! so that "leave untouched" and "clear" never collapse into each other.

use serde::{Deserialize, Deserializer};

/// A single field of a patch.
///
/// Use together with `#[serde(default)]` on the containing struct field:
/// a missing key then becomes [`FieldPatch::Absent`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldPatch<T> {
    /// Key not supplied; the stored value is left unchanged.
    #[default]
    Absent,
    /// Key supplied as `null`; the stored value is cleared.
    Null,
    /// Key supplied with a value.
    Value(T),
}

impl<T> FieldPatch<T> {
    /// Returns the carried value, if any.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }
}

impl<T: Clone> FieldPatch<T> {
    /// Merges this patch into the currently stored optional value.
    #[must_use]
    pub fn merge_into(&self, current: Option<T>) -> Option<T> {
        match self {
            Self::Absent => current,
            Self::Null => None,
            Self::Value(value) => Some(value.clone()),
        }
    }
}

impl<T> From<Option<T>> for FieldPatch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Value)
    }
}

impl<'de, T> Deserialize<'de> for FieldPatch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}
