//! Serde helpers shared by the patch DTOs.

use serde::{Deserialize, Deserializer};

/// Keeps an explicit `null` distinct from an absent field.
///
/// Used with `#[serde(default, deserialize_with = "double_option")]`: absent
/// becomes `None`, `null` becomes `Some(None)` and a value becomes `Some(Some(v))`.
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
