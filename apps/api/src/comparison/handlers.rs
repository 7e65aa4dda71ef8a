use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::comparison::selection::{
    can_compare, can_select, ensure_comparable, normalize, project, toggle, ComparisonView, MAX_SELECTION,
};
use crate::errors::AppError;
use crate::models::EntityId;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    #[serde(default)]
    pub selection: Vec<EntityId>,
    pub id: EntityId,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub selection: Vec<EntityId>,
    /// False when the selection was full and the id was ignored.
    pub accepted: bool,
    pub can_compare: bool,
    pub selection_full: bool,
}

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub selection: Vec<EntityId>,
}

/// POST /api/v1/comparison/toggle
pub async fn handle_toggle(Json(request): Json<ToggleRequest>) -> Json<ToggleResponse> {
    let current = normalize(&request.selection);
    let accepted = can_select(&current, &request.id);
    let selection = toggle(&current, &request.id);
    Json(ToggleResponse {
        accepted,
        can_compare: can_compare(&selection),
        selection_full: selection.len() >= MAX_SELECTION,
        selection,
    })
}

/// POST /api/v1/comparison
///
/// Rejects selections under two before any upstream call, then projects the
/// enriched entities in selection order.
pub async fn handle_compare(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> Result<Json<ComparisonView>, AppError> {
    let selection = normalize(&request.selection);
    ensure_comparable(&selection)?;

    let enrichment = state.recommender.compare(&selection).await?;
    let view = project(&selection, &enrichment.colleges);
    info!(
        "Comparison built for {} colleges ({} common programs, upstream reported {})",
        view.columns.len(),
        view.common_programs.len(),
        enrichment.common_features.programs.len()
    );

    Ok(Json(view))
}
