//! Serde helpers shared by resource models.
//!
//! Zendesk treats zero values as "not provided": an empty string, a zero
//! id, or `false` never carry business meaning on the wire. These helpers
//! keep that convention in both directions.

use serde::{Deserialize, Deserializer};

/// `skip_serializing_if` predicate for booleans.
pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// Deserializes `null` or `false` as `false`.
pub(crate) fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Deserializes `null` as an empty string.
pub(crate) fn null_as_empty_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes `null` as `0`.
pub(crate) fn null_as_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes `null` or `""` as `None`.
pub(crate) fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}

/// Deserializes `null` or `0` as `None`.
pub(crate) fn zero_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.filter(|n| *n != 0))
}
