//! Serde helper for fields that a node may send as `null`.

use serde::{Deserialize, Deserializer};

/// Deserializes `T`, mapping an explicit `null` to `T::default()`.
///
/// Combined with `#[serde(default)]` this makes a field tolerate being absent,
/// `null`, or present.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
