use std::sync::Arc;

use crate::config::Config;
use crate::upstream::RecommendationService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Remote recommender. `HttpRecommender` in production, a stub in tests.
    pub recommender: Arc<dyn RecommendationService>,
}
