use axum::Json;
use serde::{Deserialize, Serialize};

use crate::view::reducer::{derive, reduce, ViewAction, ViewModel, ViewState};

#[derive(Debug, Deserialize)]
pub struct ReduceRequest {
    #[serde(default)]
    pub state: ViewState,
    pub action: ViewAction,
}

#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub state: ViewState,
    pub view: ViewModel,
}

impl ViewResponse {
    fn of(state: ViewState) -> Self {
        let view = derive(&state);
        Self { state, view }
    }
}

/// GET /api/v1/view/initial
pub async fn handle_initial_view() -> Json<ViewResponse> {
    Json(ViewResponse::of(ViewState::default()))
}

/// POST /api/v1/view/reduce
///
/// Applies one action to the submitted state and returns the next state with
/// everything derived from it.
pub async fn handle_reduce(Json(request): Json<ReduceRequest>) -> Json<ViewResponse> {
    Json(ViewResponse::of(reduce(&request.state, request.action)))
}
