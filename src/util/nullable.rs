// src/util/nullable.rs
use serde::{Deserialize, Deserializer};

use crate::util::ids::now_millis;

/// Deserialize an explicit `null` as the type's default.
///
/// Pair with `#[serde(default)]` so an absent field behaves the same way.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Epoch milliseconds, with `null` read as the current time.
pub fn null_as_now<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or_else(now_millis))
}
