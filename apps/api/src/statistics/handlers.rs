use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::state::AppState;
use crate::statistics::view::StatisticsView;

/// GET /api/v1/statistics
pub async fn handle_statistics(
    State(state): State<AppState>,
) -> Result<Json<StatisticsView>, AppError> {
    let payload = state.recommender.statistics().await?;
    Ok(Json(StatisticsView::from(&payload)))
}
