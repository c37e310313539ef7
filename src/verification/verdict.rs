//! Read-side view over stored verdicts.
//!
//! Verdicts are stored exactly as the oracle returned them. This view lets
//! consumers inspect a verdict as JSON when it parses, without changing what
//! is stored.

use serde_json::Value;

/// A stored verdict, parsed when possible.
#[derive(Debug, Clone, PartialEq)]
pub enum VerdictView {
    /// The verdict is a JSON object.
    Parsed(serde_json::Map<String, Value>),
    /// The verdict is not a JSON object; kept verbatim.
    Raw(String),
}

impl VerdictView {
    /// Classify a raw verdict.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Self::Parsed(map),
            _ => Self::Raw(raw.to_string()),
        }
    }

    /// Field of a parsed verdict.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Parsed(map) => map.get(name),
            Self::Raw(_) => None,
        }
    }

    /// Whether every named field is present.
    pub fn has_fields<'a>(&self, mut names: impl Iterator<Item = &'a str>) -> bool {
        match self {
            Self::Parsed(map) => names.all(|name| map.contains_key(name)),
            Self::Raw(_) => false,
        }
    }
}
