//! Results Pipeline: filter, sort and chart-project a recommendation list.
//!
//! Pure and synchronous. The input slice is never mutated; callers get a new
//! `ResultsView` for every (records, filter, sort) triple.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::record::{percent, FeatureMatches, RecommendationRecord};
use crate::models::{truncate_label, BudgetRange};

/// Chart labels keep this many characters of the college name.
pub const CHART_LABEL_CHARS: usize = 15;

const ALL: &str = "all";

// ────────────────────────────────────────────────────────────────────────────
// Filter / sort inputs
// ────────────────────────────────────────────────────────────────────────────

/// Location filter: `"all"` or a location compared case- and
/// whitespace-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LocationFilter {
    #[default]
    All,
    Only(String),
}

impl From<String> for LocationFilter {
    fn from(raw: String) -> Self {
        if raw == ALL {
            LocationFilter::All
        } else {
            LocationFilter::Only(raw)
        }
    }
}

impl From<LocationFilter> for String {
    fn from(filter: LocationFilter) -> Self {
        match filter {
            LocationFilter::All => ALL.to_string(),
            LocationFilter::Only(location) => location,
        }
    }
}

/// Budget filter: `"all"` or an exact budget tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BudgetFilter {
    #[default]
    All,
    Only(BudgetRange),
}

impl From<String> for BudgetFilter {
    fn from(raw: String) -> Self {
        if raw == ALL {
            BudgetFilter::All
        } else {
            BudgetFilter::Only(BudgetRange::from(raw))
        }
    }
}

impl From<BudgetFilter> for String {
    fn from(filter: BudgetFilter) -> Self {
        match filter {
            BudgetFilter::All => ALL.to_string(),
            BudgetFilter::Only(budget) => budget.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub location: LocationFilter,
    #[serde(default)]
    pub budget: BudgetFilter,
}

impl FilterSpec {
    pub fn is_noop(&self) -> bool {
        self.location == LocationFilter::All && self.budget == BudgetFilter::All
    }

    pub fn accepts(&self, record: &RecommendationRecord) -> bool {
        location_matches(&self.location, &record.location)
            && budget_matches(&self.budget, &record.budget_range)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Similarity,
    Confidence,
    Gpa,
    Name,
    /// Any key the client sent that we do not know. Leaves order untouched.
    #[serde(other)]
    Unknown,
}

// ────────────────────────────────────────────────────────────────────────────
// Output view model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultsStatus {
    /// No recommendations have been fetched yet.
    NotFetched,
    /// Records exist but the active filters exclude all of them.
    EmptyAfterFilter,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBar {
    pub label: String,
    pub similarity_pct: f64,
    pub confidence_pct: f64,
}

/// Presentation fields for one result card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub key: String,
    pub record: RecommendationRecord,
    pub similarity_pct: f64,
    pub confidence_pct: f64,
    pub feature_matches: Option<FeatureMatches>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsView {
    pub status: ResultsStatus,
    pub total_count: usize,
    pub filtered_count: usize,
    pub rows: Vec<ResultRow>,
    pub chart: Vec<ScoreBar>,
    pub available_locations: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Filters then stably sorts. The core ordering used by every caller,
/// including CSV export.
pub fn filter_and_sort(
    records: &[RecommendationRecord],
    filter: &FilterSpec,
    sort: SortKey,
) -> Vec<RecommendationRecord> {
    let mut kept: Vec<RecommendationRecord> = records
        .iter()
        .filter(|r| filter.accepts(r))
        .cloned()
        .collect();

    // `sort_by` is stable, so ties keep upstream order.
    match sort {
        SortKey::Similarity => kept.sort_by(|a, b| desc(a.similarity_score, b.similarity_score)),
        SortKey::Confidence => kept.sort_by(|a, b| desc(a.confidence_score, b.confidence_score)),
        SortKey::Gpa => kept.sort_by(|a, b| asc(a.min_gpa, b.min_gpa)),
        SortKey::Name => kept.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortKey::Unknown => {}
    }

    kept
}

/// Full pipeline: filter → sort → derive rows and chart series.
pub fn process(
    records: &[RecommendationRecord],
    filter: &FilterSpec,
    sort: SortKey,
) -> ResultsView {
    let sorted = filter_and_sort(records, filter, sort);

    let status = if records.is_empty() {
        ResultsStatus::NotFetched
    } else if sorted.is_empty() {
        ResultsStatus::EmptyAfterFilter
    } else {
        ResultsStatus::Ready
    };

    debug!(
        "Results pipeline: total={}, filtered={}, sort={:?}, unfiltered={}",
        records.len(),
        sorted.len(),
        sort,
        filter.is_noop()
    );

    let chart = score_series(&sorted);
    let rows = sorted
        .into_iter()
        .enumerate()
        .map(|(index, record)| ResultRow {
            key: record.render_key(index),
            similarity_pct: percent(record.similarity_score),
            confidence_pct: percent(record.confidence_score),
            feature_matches: record.feature_scores.as_ref().map(|s| s.matches()),
            record,
        })
        .collect::<Vec<_>>();

    ResultsView {
        status,
        total_count: records.len(),
        filtered_count: rows.len(),
        rows,
        chart,
        available_locations: available_locations(records),
    }
}

/// One bar pair per record, in the order given.
pub fn score_series(records: &[RecommendationRecord]) -> Vec<ScoreBar> {
    records
        .iter()
        .map(|r| ScoreBar {
            label: truncate_label(&r.name, CHART_LABEL_CHARS),
            similarity_pct: percent(r.similarity_score),
            confidence_pct: percent(r.confidence_score),
        })
        .collect()
}

/// Distinct non-empty locations across the unfiltered records, first-seen order.
pub fn available_locations(records: &[RecommendationRecord]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for record in records {
        if !record.location.is_empty() && !seen.contains(&record.location) {
            seen.push(record.location.clone());
        }
    }
    seen
}

fn location_matches(filter: &LocationFilter, location: &str) -> bool {
    match filter {
        LocationFilter::All => true,
        LocationFilter::Only(wanted) => {
            let have = location.trim().to_lowercase();
            !have.is_empty() && have == wanted.trim().to_lowercase()
        }
    }
}

fn budget_matches(filter: &BudgetFilter, budget: &BudgetRange) -> bool {
    match filter {
        BudgetFilter::All => true,
        BudgetFilter::Only(wanted) => wanted.as_str() == budget.as_str(),
    }
}

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn asc(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Case-insensitive primary order. Names equal up to case put the lowercase
/// form first (`"ace"` before `"Ace"`), as browser collation does.
///
/// Not full locale collation: accented letters compare by code point after
/// lowercasing, so `"Éco"` sorts after `"Zen"`.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
