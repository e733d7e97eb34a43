//! Extracted memory types.
//!
//! The persona service distils a conversation into three independent
//! collections: preferences, emotional patterns, and facts. Every collection
//! may be missing, `null`, or empty on the wire; all three decode to an empty
//! `Vec`. A [`Memory`] whose collections are all empty is still distinct from
//! no memory at all (`Option::None`) -- see `persona_core::memory::view`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Decode `null` or a missing field as `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A loosely-typed score the service reports as either a number or a label
/// (e.g. `0.9` or `"high"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    /// Whether the value carries information worth displaying.
    ///
    /// Empty strings and zero are treated as absent.
    pub fn is_present(&self) -> bool {
        match self {
            Scalar::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
            Scalar::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

/// Something the user likes, dislikes, or habitually does.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    #[serde(default, deserialize_with = "null_as_default")]
    pub preference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// A recurring emotional state and what sets it off.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionalPattern {
    #[serde(default, deserialize_with = "null_as_default")]
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// A fact about the user worth remembering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    #[serde(default, deserialize_with = "null_as_default")]
    pub fact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Structured memory extracted from a conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    #[serde(default, deserialize_with = "null_as_default")]
    pub preferences: Vec<Preference>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub emotional_patterns: Vec<EmotionalPattern>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub facts: Vec<Fact>,
}

impl Memory {
    /// True when all three collections are empty.
    pub fn is_empty(&self) -> bool {
        self.preferences.is_empty() && self.emotional_patterns.is_empty() && self.facts.is_empty()
    }

    /// Total number of items across all collections.
    pub fn item_count(&self) -> usize {
        self.preferences.len() + self.emotional_patterns.len() + self.facts.len()
    }
}

/// Memory the service has accumulated for a user across extractions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredMemory {
    #[serde(flatten)]
    pub memory: Memory,
    /// Local timestamp of the last merge, as reported by the service.
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}
