use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;
use crate::domain::value_objects::EntityKind;

/// A normalized entity name.
///
/// Invariant: never blank, no surrounding whitespace, upper-cased. This is
/// the canonical storage and comparison form for every entity kind, so it is
/// the only place that knows how names are normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityName(String);

impl EntityName {
    /// Normalize a raw name for the given entity kind.
    pub fn parse(kind: EntityKind, raw: impl AsRef<str>) -> Result<Self, DomainError> {
        Self::normalize(raw.as_ref()).ok_or(DomainError::BlankName { kind })
    }

    /// Trim and upper-case; `None` when nothing is left.
    fn normalize(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_uppercase()))
    }

    /// Normalize an optional raw name; `None` is treated like a blank name.
    pub fn parse_opt(kind: EntityKind, raw: Option<&str>) -> Result<Self, DomainError> {
        Self::parse(kind, raw.unwrap_or_default())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for EntityName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntityName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::normalize(&raw)
            .ok_or_else(|| serde::de::Error::custom("name cannot be null or blank"))
    }
}
