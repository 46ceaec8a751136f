//! Serde helpers for payloads that send `null` instead of omitting a field.

use serde::{Deserialize, Deserializer};

/// Decode `null` as the field type's default value.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
