//! Feedback: star ratings on individual recommendations, forwarded upstream.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::EntityId;
use crate::state::AppState;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub college_id: EntityId,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
}

/// What the recommendation service receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    pub college_id: EntityId,
    pub rating: u8,
    pub comment: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub message: String,
    pub feedback: FeedbackSubmission,
}

impl FeedbackRequest {
    pub fn into_submission(self, now: DateTime<Utc>) -> Result<FeedbackSubmission, AppError> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(AppError::Validation(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}, got {}",
                self.rating
            )));
        }

        Ok(FeedbackSubmission {
            college_id: self.college_id,
            rating: self.rating,
            comment: self.comment.unwrap_or_default(),
            timestamp: now,
        })
    }
}

/// POST /api/v1/feedback
pub async fn handle_feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let submission = request.into_submission(Utc::now())?;
    state.recommender.feedback(&submission).await?;
    info!(
        "Feedback forwarded for college {} (rating {})",
        submission.college_id, submission.rating
    );

    Ok(Json(FeedbackResponse {
        message: "Thank you for your feedback!".to_string(),
        feedback: submission,
    }))
}
