//! Comparison set: a bounded, ordered selection of catalog entities and the
//! side-by-side table/chart derived from it.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::catalog::CatalogEntity;
use crate::models::{truncate_label, EntityId};

/// At most this many colleges are compared at once.
pub const MAX_SELECTION: usize = 4;
/// The remote comparison needs at least this many.
pub const MIN_TO_COMPARE: usize = 2;
/// Chart labels keep this many characters of the college name.
pub const CHART_LABEL_CHARS: usize = 20;

const TYPE_FALLBACK: &str = "N/A";

/// Adds `id` if absent and there is room, removes it if present. A full
/// selection ignores new ids.
pub fn toggle(selection: &[EntityId], id: &EntityId) -> Vec<EntityId> {
    if selection.contains(id) {
        return selection.iter().filter(|i| *i != id).cloned().collect();
    }

    let mut next = selection.to_vec();
    if next.len() < MAX_SELECTION {
        next.push(id.clone());
    }
    next
}

/// Drops duplicates and anything past the size bound, keeping first-seen
/// order. Selections arriving over the wire are not trusted to be well formed.
pub fn normalize(selection: &[EntityId]) -> Vec<EntityId> {
    let mut clean: Vec<EntityId> = Vec::with_capacity(MAX_SELECTION);
    for id in selection {
        if clean.len() == MAX_SELECTION {
            break;
        }
        if !clean.contains(id) {
            clean.push(id.clone());
        }
    }
    clean
}

/// Whether the selection affordance for `id` should be enabled.
pub fn can_select(selection: &[EntityId], id: &EntityId) -> bool {
    selection.contains(id) || selection.len() < MAX_SELECTION
}

pub fn can_compare(selection: &[EntityId]) -> bool {
    selection.len() >= MIN_TO_COMPARE
}

/// Guard for the remote comparison call. Fewer than two is a client-side
/// rejection, never a network request.
pub fn ensure_comparable(selection: &[EntityId]) -> Result<(), AppError> {
    if can_compare(selection) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Please select at least {MIN_TO_COMPARE} colleges to compare"
        )))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Projection
// ────────────────────────────────────────────────────────────────────────────

/// One table column: a selected college.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonColumn {
    pub id: EntityId,
    pub name: String,
    pub location: String,
    pub min_gpa: f64,
    pub budget_range: String,
    pub programs: String,
    #[serde(rename = "type")]
    pub college_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonBar {
    pub name: String,
    pub min_gpa: f64,
    pub program_count: usize,
}

/// Feature row of the rendered table, one cell per column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub feature: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonView {
    pub columns: Vec<ComparisonColumn>,
    pub rows: Vec<ComparisonRow>,
    pub chart: Vec<ComparisonBar>,
    pub common_programs: Vec<String>,
}

/// Projects the selection against the catalog, keeping selection order.
/// Ids that the catalog does not know are skipped.
pub fn project(selection: &[EntityId], catalog: &[CatalogEntity]) -> ComparisonView {
    let selected: Vec<&CatalogEntity> = selection
        .iter()
        .filter_map(|id| catalog.iter().find(|c| &c.id == id))
        .collect();

    let columns: Vec<ComparisonColumn> = selected
        .iter()
        .map(|c| ComparisonColumn {
            id: c.id.clone(),
            name: c.name.clone(),
            location: c.location.clone(),
            min_gpa: c.min_gpa,
            budget_range: c.budget_range.to_string(),
            programs: c.programs.join(", "),
            college_type: c
                .college_type
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| TYPE_FALLBACK.to_string()),
        })
        .collect();

    let chart = selected
        .iter()
        .map(|c| ComparisonBar {
            name: truncate_label(&c.name, CHART_LABEL_CHARS),
            min_gpa: c.min_gpa,
            program_count: c.programs.len(),
        })
        .collect();

    ComparisonView {
        rows: table_rows(&columns),
        columns,
        chart,
        common_programs: common_programs(&selected),
    }
}

fn table_rows(columns: &[ComparisonColumn]) -> Vec<ComparisonRow> {
    let row = |feature: &str, cell: fn(&ComparisonColumn) -> String| ComparisonRow {
        feature: feature.to_string(),
        values: columns.iter().map(cell).collect(),
    };

    vec![
        row("Location", |c| c.location.clone()),
        row("Min GPA", |c| c.min_gpa.to_string()),
        row("Budget Range", |c| c.budget_range.clone()),
        row("Programs", |c| c.programs.clone()),
        row("Type", |c| c.college_type.clone()),
    ]
}

/// Programs offered by every selected college, in the first college's order.
fn common_programs(selected: &[&CatalogEntity]) -> Vec<String> {
    let Some((first, rest)) = selected.split_first() else {
        return Vec::new();
    };

    let mut common: Vec<String> = Vec::new();
    for program in &first.programs {
        if rest.iter().all(|c| c.programs.contains(program)) && !common.contains(program) {
            common.push(program.clone());
        }
    }
    common
}
