pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{catalog, comparison, feedback, results, slots, statistics, view};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog
        .route("/api/v1/catalog", get(catalog::handlers::handle_list_catalog))
        .route(
            "/api/v1/catalog/options",
            get(catalog::handlers::handle_catalog_options),
        )
        .route("/api/v1/catalog/:id", get(catalog::handlers::handle_get_college))
        // Form and conversational filling
        .route("/api/v1/form/merge", post(slots::handlers::handle_merge))
        .route("/api/v1/chat", post(slots::handlers::handle_chat))
        // Recommendations and results
        .route(
            "/api/v1/recommendations",
            post(results::handlers::handle_recommend),
        )
        .route(
            "/api/v1/results/view",
            post(results::handlers::handle_results_view),
        )
        .route(
            "/api/v1/results/export",
            post(results::handlers::handle_export),
        )
        // Comparison
        .route(
            "/api/v1/comparison/toggle",
            post(comparison::handlers::handle_toggle),
        )
        .route(
            "/api/v1/comparison",
            post(comparison::handlers::handle_compare),
        )
        // Statistics and feedback
        .route(
            "/api/v1/statistics",
            get(statistics::handlers::handle_statistics),
        )
        .route("/api/v1/feedback", post(feedback::handle_feedback))
        // Session view state
        .route("/api/v1/view/initial", get(view::handlers::handle_initial_view))
        .route("/api/v1/view/reduce", post(view::handlers::handle_reduce))
        .with_state(state)
}
