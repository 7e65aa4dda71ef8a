//! View state: the whole client session as one immutable value, advanced by
//! pure transitions. Derived data (results view, affordances) is recomputed
//! from the canonical state on every call and never stored.

use serde::{Deserialize, Deserializer, Serialize};

use crate::comparison::selection::{self, MAX_SELECTION};
use crate::models::form::{FormField, FormState};
use crate::models::record::RecommendationRecord;
use crate::models::EntityId;
use crate::results::pipeline::{process, FilterSpec, ResultsView, SortKey};
use crate::slots::chat::{initial_transcript, ChatTurn};
use crate::slots::merge::{merge_with_policy, ExtractedData, MergePolicy};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    #[serde(default)]
    pub form: FormState,
    #[serde(default)]
    pub records: Vec<RecommendationRecord>,
    #[serde(default)]
    pub filter: FilterSpec,
    #[serde(default)]
    pub sort: SortKey,
    /// Deduplicated and clipped to `MAX_SELECTION` on the way in.
    #[serde(default, deserialize_with = "normalized_selection")]
    pub selection: Vec<EntityId>,
    #[serde(default = "initial_transcript")]
    pub transcript: Vec<ChatTurn>,
    #[serde(default)]
    pub merge_policy: MergePolicy,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            form: FormState::default(),
            records: Vec::new(),
            filter: FilterSpec::default(),
            sort: SortKey::default(),
            selection: Vec::new(),
            transcript: initial_transcript(),
            merge_policy: MergePolicy::default(),
        }
    }
}

fn normalized_selection<'de, D>(deserializer: D) -> Result<Vec<EntityId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<EntityId>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(selection::normalize(&raw))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewAction {
    SetField { field: FormField, value: String },
    MergeExtracted { extracted: ExtractedData },
    ReplaceRecords { records: Vec<RecommendationRecord> },
    SetFilter { filter: FilterSpec },
    ResetFilters,
    SetSort { sort: SortKey },
    ToggleCompare { id: EntityId },
    AppendTurn { turn: ChatTurn },
}

pub fn reduce(state: &ViewState, action: ViewAction) -> ViewState {
    let mut next = state.clone();

    match action {
        ViewAction::SetField { field, value } => next.form.set(field, value),
        ViewAction::MergeExtracted { extracted } => {
            next.form = merge_with_policy(&state.form, &extracted, state.merge_policy);
        }
        ViewAction::ReplaceRecords { records } => {
            // Location options come from the records, so old filters may not apply.
            next.records = records;
            next.filter = FilterSpec::default();
        }
        ViewAction::SetFilter { filter } => next.filter = filter,
        ViewAction::ResetFilters => next.filter = FilterSpec::default(),
        ViewAction::SetSort { sort } => next.sort = sort,
        ViewAction::ToggleCompare { id } => {
            next.selection = selection::toggle(&selection::normalize(&state.selection), &id);
        }
        ViewAction::AppendTurn { turn } => next.transcript.push(turn),
    }

    next
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub results: ResultsView,
    pub missing_fields: Vec<String>,
    pub can_submit: bool,
    pub can_compare: bool,
    pub selection_full: bool,
}

pub fn derive(state: &ViewState) -> ViewModel {
    let missing_fields: Vec<String> = state
        .form
        .missing_fields()
        .into_iter()
        .map(str::to_string)
        .collect();

    let chosen = selection::normalize(&state.selection);

    ViewModel {
        results: process(&state.records, &state.filter, state.sort),
        can_submit: missing_fields.is_empty(),
        missing_fields,
        can_compare: selection::can_compare(&chosen),
        selection_full: chosen.len() >= MAX_SELECTION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BudgetRange;
    use crate::results::pipeline::{LocationFilter, ResultsStatus};
    use serde_json::json;

    fn record(name: &str, location: &str, sim: f64) -> RecommendationRecord {
        RecommendationRecord {
            name: name.to_string(),
            location: location.to_string(),
            programs: vec!["BBA".to_string()],
            budget_range: BudgetRange::Low,
            similarity_score: sim,
            ..RecommendationRecord::default()
        }
    }

    #[test]
    fn test_default_state_starts_with_greeting() {
        let state = ViewState::default();
        assert_eq!(state.transcript.len(), 1);
        let view = derive(&state);
        assert_eq!(view.results.status, ResultsStatus::NotFetched);
        assert!(!view.can_submit);
        assert_eq!(view.missing_fields.len(), 5);
    }

    #[test]
    fn test_reduce_does_not_touch_previous_state() {
        let state = ViewState::default();
        let next = reduce(
            &state,
            ViewAction::SetField {
                field: FormField::Stream,
                value: "Science".to_string(),
            },
        );
        assert_eq!(state.form.stream, "");
        assert_eq!(next.form.stream, "Science");
    }

    #[test]
    fn test_replace_records_resets_filters() {
        let state = ViewState {
            filter: FilterSpec {
                location: LocationFilter::Only("pokhara".to_string()),
                ..FilterSpec::default()
            },
            ..ViewState::default()
        };
        let next = reduce(
            &state,
            ViewAction::ReplaceRecords {
                records: vec![record("A", "Kathmandu", 0.4), record("B", "Lalitpur", 0.8)],
            },
        );
        assert!(next.filter.is_noop());
        let view = derive(&next);
        assert_eq!(view.results.filtered_count, 2);
        assert_eq!(view.results.rows[0].record.name, "B");
    }

    #[test]
    fn test_filter_then_reset() {
        let state = reduce(
            &ViewState::default(),
            ViewAction::ReplaceRecords {
                records: vec![record("A", "Kathmandu", 0.4)],
            },
        );
        let filtered = reduce(
            &state,
            ViewAction::SetFilter {
                filter: FilterSpec {
                    location: LocationFilter::Only("lalitpur".to_string()),
                    ..FilterSpec::default()
                },
            },
        );
        assert_eq!(derive(&filtered).results.status, ResultsStatus::EmptyAfterFilter);
        let reset = reduce(&filtered, ViewAction::ResetFilters);
        assert_eq!(derive(&reset).results.status, ResultsStatus::Ready);
    }

    #[test]
    fn test_toggle_compare_updates_affordances() {
        let mut state = ViewState::default();
        for id in 1..=5 {
            state = reduce(&state, ViewAction::ToggleCompare { id: EntityId::Int(id) });
        }
        assert_eq!(state.selection.len(), MAX_SELECTION);
        let view = derive(&state);
        assert!(view.can_compare);
        assert!(view.selection_full);
    }

    #[test]
    fn test_oversized_selection_is_clipped_on_the_wire() {
        let state: ViewState =
            serde_json::from_value(json!({"selection": [1, 2, 3, 4, 5, 6]})).unwrap();
        assert_eq!(state.selection.len(), MAX_SELECTION);

        let next = reduce(&state, ViewAction::ToggleCompare { id: EntityId::Int(9) });
        assert_eq!(
            next.selection,
            vec![EntityId::Int(1), EntityId::Int(2), EntityId::Int(3), EntityId::Int(4)]
        );
        assert!(derive(&next).selection_full);
    }

    #[test]
    fn test_duplicated_selection_is_deduped_before_toggle() {
        let state: ViewState = serde_json::from_value(json!({"selection": [1, 1, 2]})).unwrap();
        assert_eq!(state.selection, vec![EntityId::Int(1), EntityId::Int(2)]);

        let once = reduce(&state, ViewAction::ToggleCompare { id: EntityId::Int(1) });
        assert_eq!(once.selection, vec![EntityId::Int(2)]);
        let twice = reduce(&once, ViewAction::ToggleCompare { id: EntityId::Int(1) });
        assert_eq!(twice.selection, vec![EntityId::Int(2), EntityId::Int(1)]);
    }

    #[test]
    fn test_in_memory_duplicates_never_reach_the_view() {
        let state = ViewState {
            selection: vec![EntityId::Int(3), EntityId::Int(3)],
            ..ViewState::default()
        };
        assert!(!derive(&state).can_compare);
        let next = reduce(&state, ViewAction::ToggleCompare { id: EntityId::Int(3) });
        assert!(next.selection.is_empty());
    }

    #[test]
    fn test_merge_extracted_honors_state_policy() {
        let state = ViewState {
            form: FormState {
                location: "Kathmandu".to_string(),
                ..FormState::default()
            },
            merge_policy: MergePolicy::SkipEmpty,
            ..ViewState::default()
        };
        let extracted = json!({"location": "", "stream": "Humanities"})
            .as_object()
            .cloned()
            .unwrap();
        let next = reduce(&state, ViewAction::MergeExtracted { extracted });
        assert_eq!(next.form.location, "Kathmandu");
        assert_eq!(next.form.stream, "Humanities");
    }

    #[test]
    fn test_action_wire_format() {
        let action: ViewAction = serde_json::from_value(json!({
            "type": "set_sort",
            "sort": "gpa"
        }))
        .unwrap();
        assert_eq!(action, ViewAction::SetSort { sort: SortKey::Gpa });

        let action: ViewAction =
            serde_json::from_value(json!({"type": "toggle_compare", "id": 7})).unwrap();
        assert_eq!(action, ViewAction::ToggleCompare { id: EntityId::Int(7) });
    }
}
