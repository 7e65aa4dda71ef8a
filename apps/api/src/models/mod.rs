pub mod catalog;
pub mod form;
pub mod record;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque entity identifier as issued by the recommendation service.
/// The upstream emits integers today; strings are accepted so a change there
/// does not break deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Int(id) => write!(f, "{id}"),
            EntityId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        EntityId::Int(id)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        EntityId::Text(id.to_string())
    }
}

impl EntityId {
    /// Reads an id from a URL path segment. Numeric segments become `Int` so
    /// they compare equal to the ids in upstream payloads.
    pub fn from_path(segment: &str) -> Self {
        segment
            .parse::<i64>()
            .map(EntityId::Int)
            .unwrap_or_else(|_| EntityId::Text(segment.to_string()))
    }
}

/// Budget tier of a college. Unrecognized strings are preserved verbatim so
/// the exact-match budget filter can still reject them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BudgetRange {
    Low,
    Medium,
    High,
    Other(String),
}

impl BudgetRange {
    pub fn as_str(&self) -> &str {
        match self {
            BudgetRange::Low => "low",
            BudgetRange::Medium => "medium",
            BudgetRange::High => "high",
            BudgetRange::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, BudgetRange::Other(_))
    }
}

impl Default for BudgetRange {
    fn default() -> Self {
        BudgetRange::Other(String::new())
    }
}

impl From<String> for BudgetRange {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "low" => BudgetRange::Low,
            "medium" => BudgetRange::Medium,
            "high" => BudgetRange::High,
            _ => BudgetRange::Other(raw),
        }
    }
}

impl From<BudgetRange> for String {
    fn from(budget: BudgetRange) -> Self {
        budget.as_str().to_string()
    }
}

impl fmt::Display for BudgetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deserializes `null` as the type's default. Upstream payloads use `null`
/// and "missing" interchangeably.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Takes the first `max_chars` characters of `name` and appends an ellipsis.
/// Counts chars, not bytes, so multi-byte names never split mid-codepoint.
pub fn truncate_label(name: &str, max_chars: usize) -> String {
    let head: String = name.chars().take(max_chars).collect();
    format!("{head}...")
}
