//! The analysis payload as the service returns it.
//!
//! The payload is kept as the raw JSON object so that a stored result replays
//! byte-for-byte, unknown fields included. Typed views are read on demand and
//! are lenient: a field with the wrong shape reads as absent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Categories every analysis is expected to score, in display order.
/// The radar chart maps these positions 1:1 to its axes.
pub const FIXED_CATEGORIES: [&str; 5] = [
    "racism",
    "sexism",
    "homophobia",
    "religious_blasphemy",
    "parental_disapproval",
];

const OTHER_MINORITIES: &str = "other_minorities";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisPayload(Map<String, Value>);

/// Scores for one category.
///
/// Older responses carry a single `score`; it fills whichever of
/// `ai_score` / `potential_score` is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub ai_score: u8,
    pub potential_score: u8,
    pub reason: String,
}

/// An entry of `other_minorities`: a category named by the service at response time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedCategoryScore {
    pub group: String,
    #[serde(flatten)]
    pub score: CategoryScore,
}

impl AnalysisPayload {
    /// Wraps a JSON value; anything other than an object is rejected.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Top-level lookup of a category by key.
    pub fn category(&self, key: &str) -> Option<CategoryScore> {
        self.0.get(key).and_then(CategoryScore::from_value)
    }

    /// The dynamic categories in the order the service listed them.
    /// Malformed elements are skipped.
    pub fn other_minorities(&self) -> Vec<NamedCategoryScore> {
        self.0
            .get(OTHER_MINORITIES)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(NamedCategoryScore::from_value)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn shaming_line(&self) -> Option<&str> {
        self.str_field("shaming_line")
    }

    pub fn probability_beaten_up(&self) -> Option<u8> {
        self.0.get("probability_beaten_up").and_then(percent)
    }

    pub fn probability_cancelled(&self) -> Option<u8> {
        self.0.get("probability_cancelled").and_then(percent)
    }

    pub fn history_summary(&self) -> Option<&str> {
        self.str_field("history_summary")
    }

    pub fn conversational_reception_score(&self) -> Option<u8> {
        self.0
            .get("conversational_reception_score")
            .and_then(percent)
    }

    pub fn problematic_words(&self) -> Vec<&str> {
        self.0
            .get("problematic_words")
            .and_then(Value::as_array)
            .map(|words| words.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl CategoryScore {
    /// Reads a category object. Returns `None` when no usable score is present.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let legacy = obj.get("score").and_then(percent);
        let ai_score = obj.get("ai_score").and_then(percent).or(legacy)?;
        let potential_score = obj
            .get("potential_score")
            .and_then(percent)
            .or(legacy)
            .unwrap_or(ai_score);
        let reason = obj
            .get("reason")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Some(Self {
            ai_score,
            potential_score,
            reason,
        })
    }
}

impl NamedCategoryScore {
    pub fn from_value(value: &Value) -> Option<Self> {
        let group = value.get("group").and_then(Value::as_str)?.to_string();
        let score = CategoryScore::from_value(value)?;
        Some(Self { group, score })
    }
}

/// Reads a 0-100 number, clamping out-of-range values.
fn percent(value: &Value) -> Option<u8> {
    let n = value.as_f64()?;
    if !n.is_finite() {
        return None;
    }
    Some(n.round().clamp(0.0, 100.0) as u8)
}
