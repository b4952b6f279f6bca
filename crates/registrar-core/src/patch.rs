//! Serde helpers for partial-update structs.

use serde::{Deserialize, Deserializer};

/// Deserialise a present field (including an explicit `null`) as `Some(..)`.
///
/// Paired with `#[serde(default)]` on an `Option<Option<T>>`, this separates
/// "absent" (`None`) from "set to null" (`Some(None)`).
pub(crate) fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
  T: Deserialize<'de>,
  D: Deserializer<'de>,
{
  T::deserialize(deserializer).map(Some)
}

pub(crate) fn default_true() -> bool { true }
