//! Axum route handlers for recommendations and the results view.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::form::FormState;
use crate::models::record::RecommendationRecord;
use crate::results::export::{to_csv, CSV_FILENAME};
use crate::results::pipeline::{filter_and_sort, process, FilterSpec, ResultsView, SortKey};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub records: Vec<RecommendationRecord>,
    pub results: ResultsView,
}

#[derive(Debug, Deserialize)]
pub struct ResultsRequest {
    #[serde(default)]
    pub records: Vec<RecommendationRecord>,
    #[serde(default)]
    pub filter: FilterSpec,
    #[serde(default)]
    pub sort: SortKey,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/recommendations
///
/// Validates the form, asks the recommender for a fresh list and returns it
/// with the unfiltered view. The list replaces whatever the client held.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(form): Json<FormState>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let problems = form.validate();
    if !problems.is_empty() {
        return Err(AppError::Validation(problems.join("; ")));
    }

    let records = state.recommender.recommend(&form).await?;
    let results = process(&records, &FilterSpec::default(), SortKey::default());
    info!(
        "Recommendations ready: {} records for stream={}, program={}",
        records.len(),
        form.stream,
        form.preferred_program
    );

    Ok(Json(RecommendationsResponse { records, results }))
}

/// POST /api/v1/results/view
pub async fn handle_results_view(Json(request): Json<ResultsRequest>) -> Json<ResultsView> {
    Json(process(&request.records, &request.filter, request.sort))
}

/// POST /api/v1/results/export
///
/// CSV of exactly what the results view shows, in the same order.
pub async fn handle_export(Json(request): Json<ResultsRequest>) -> Result<Response, AppError> {
    let visible = filter_and_sort(&request.records, &request.filter, request.sort);
    let csv = to_csv(&visible)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{CSV_FILENAME}\""),
            ),
        ],
        csv,
    )
        .into_response())
}
