//! Statistics View: reshapes the pre-aggregated dataset counts into chart
//! series. No aggregation happens here.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::models::null_as_default;

/// Count map as delivered upstream. Key order is preserved
/// (`serde_json/preserve_order`), and that order is the display order.
pub type CountMap = Map<String, Value>;

/// Raw statistics payload. Every piece may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub by_location: CountMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub by_budget: CountMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub by_stream: CountMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_colleges: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub programs_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_min_gpa: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub name: String,
    pub value: Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsView {
    pub total_colleges: u64,
    pub programs_count: u64,
    pub average_min_gpa: f64,
    pub by_location: Vec<SeriesPoint>,
    pub by_budget: Vec<SeriesPoint>,
    pub by_stream: Vec<SeriesPoint>,
}

impl From<&StatisticsPayload> for StatisticsView {
    fn from(payload: &StatisticsPayload) -> Self {
        StatisticsView {
            total_colleges: payload.total_colleges,
            programs_count: payload.programs_count,
            average_min_gpa: payload.average_min_gpa,
            by_location: reshape(Some(&payload.by_location)),
            by_budget: reshape_budget(Some(&payload.by_budget)),
            by_stream: reshape(Some(&payload.by_stream)),
        }
    }
}

/// `{key: count}` → `[{name: key, value: count}]` in map order.
/// Entries whose value is not a number are skipped.
pub fn reshape(counts: Option<&CountMap>) -> Vec<SeriesPoint> {
    reshape_with(counts, str::to_string)
}

/// Like `reshape`, with the budget key's first letter uppercased.
pub fn reshape_budget(counts: Option<&CountMap>) -> Vec<SeriesPoint> {
    reshape_with(counts, capitalize_first)
}

fn reshape_with(counts: Option<&CountMap>, name: impl Fn(&str) -> String) -> Vec<SeriesPoint> {
    let Some(counts) = counts else {
        return Vec::new();
    };

    counts
        .iter()
        .filter_map(|(key, value)| match value {
            Value::Number(n) => Some(SeriesPoint {
                name: name(key),
                value: n.clone(),
            }),
            _ => None,
        })
        .collect()
}

/// Uppercases the first character, leaves the rest unchanged.
fn capitalize_first(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn counts(value: Value) -> CountMap {
        match value {
            Value::Object(map) => map,
            other => panic!("fixture must be an object, got {other}"),
        }
    }

    fn names(points: &[SeriesPoint]) -> Vec<&str> {
        points.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_reshape_preserves_source_order() {
        let map = counts(json!({"Lalitpur": 12, "Kathmandu": 30, "Bhaktapur": 4}));
        let points = reshape(Some(&map));
        assert_eq!(names(&points), vec!["Lalitpur", "Kathmandu", "Bhaktapur"]);
        assert_eq!(points[1].value, Number::from(30));
    }

    #[test]
    fn test_absent_map_is_empty_series() {
        assert!(reshape(None).is_empty());
        assert!(reshape_budget(Some(&CountMap::new())).is_empty());
    }

    #[test]
    fn test_budget_keys_are_capitalized() {
        let map = counts(json!({"low": 5, "medium": 9, "hIGH": 2}));
        assert_eq!(names(&reshape_budget(Some(&map))), vec!["Low", "Medium", "HIGH"]);
    }

    #[test]
    fn test_non_numeric_counts_are_skipped() {
        let map = counts(json!({"Science": 10, "Management": "n/a", "Humanities": null}));
        assert_eq!(names(&reshape(Some(&map))), vec!["Science"]);
    }

    #[test]
    fn test_view_from_partial_payload() {
        let payload: StatisticsPayload = serde_json::from_value(json!({
            "total_colleges": 95,
            "by_budget": {"medium": 40, "low": 30, "high": 25},
            "by_stream": null
        }))
        .unwrap();
        let view = StatisticsView::from(&payload);
        assert_eq!(view.total_colleges, 95);
        assert_eq!(view.programs_count, 0);
        assert_eq!(view.average_min_gpa, 0.0);
        assert!(view.by_location.is_empty());
        assert!(view.by_stream.is_empty());
        assert_eq!(names(&view.by_budget), vec!["Medium", "Low", "High"]);
    }

    #[test]
    fn test_capitalize_first_handles_empty_and_unicode() {
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("éclair"), "Éclair");
    }
}
