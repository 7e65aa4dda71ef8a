use serde::{Deserialize, Serialize};

use crate::models::{null_as_default, BudgetRange, EntityId};

/// Per-feature scores attached by the scoring service. Only the sign is
/// meaningful to the client: `> 0` is a match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureScores {
    #[serde(default, deserialize_with = "null_as_default")]
    pub program_match: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stream_match: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location_match: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub budget_match: f64,
}

/// Boolean match indicators derived from `FeatureScores`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureMatches {
    pub program: bool,
    pub stream: bool,
    pub location: bool,
    pub budget: bool,
}

impl FeatureScores {
    pub fn matches(&self) -> FeatureMatches {
        FeatureMatches {
            program: self.program_match > 0.0,
            stream: self.stream_match > 0.0,
            location: self.location_match > 0.0,
            budget: self.budget_match > 0.0,
        }
    }
}

/// A single scored recommendation, consumed read-only.
///
/// Scores are raw fractions in [0, 1]. Anything that displays them goes
/// through `percent`; filtering and sorting never see the scaled value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub programs: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub min_gpa: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub budget_range: BudgetRange,
    #[serde(default, deserialize_with = "null_as_default")]
    pub similarity_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence_score: f64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub college_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_scores: Option<FeatureScores>,
}

impl RecommendationRecord {
    /// Key for rendering lists. Falls back to the position when the upstream
    /// omitted the id; never use this for equality.
    pub fn render_key(&self, index: usize) -> String {
        match &self.id {
            Some(id) => id.to_string(),
            None => index.to_string(),
        }
    }
}

/// Scales a [0, 1] score to a percentage rounded to one decimal place.
pub fn percent(score: f64) -> f64 {
    (score * 1000.0).round() / 10.0
}
