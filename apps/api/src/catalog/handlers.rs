use axum::{
    extract::{Path, State},
    Json,
};

use crate::catalog::options::{form_options, FormOptions};
use crate::errors::AppError;
use crate::models::catalog::CatalogEntity;
use crate::models::EntityId;
use crate::state::AppState;

/// GET /api/v1/catalog
pub async fn handle_list_catalog(
    State(state): State<AppState>,
) -> Result<Json<Vec<CatalogEntity>>, AppError> {
    Ok(Json(state.recommender.catalog().await?))
}

/// GET /api/v1/catalog/options
///
/// Choices for the form's pickers, built from the live catalog.
pub async fn handle_catalog_options(
    State(state): State<AppState>,
) -> Result<Json<FormOptions>, AppError> {
    let catalog = state.recommender.catalog().await?;
    Ok(Json(form_options(&catalog)))
}

/// GET /api/v1/catalog/:id
pub async fn handle_get_college(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CatalogEntity>, AppError> {
    let id = EntityId::from_path(&id);
    let catalog = state.recommender.catalog().await?;

    catalog
        .into_iter()
        .find(|c| c.id == id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("College {id} not found")))
}
