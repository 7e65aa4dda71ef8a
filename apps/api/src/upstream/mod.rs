//! Upstream client: the single point of contact with the recommendation
//! service (scoring, comparison enrichment, statistics, chatbot, feedback).
//!
//! Handlers only see `RecommendationService`; `HttpRecommender` is the
//! production implementation, and tests swap in a stub.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::feedback::FeedbackSubmission;
use crate::models::catalog::CatalogEntity;
use crate::models::form::FormState;
use crate::models::null_as_default;
use crate::models::record::RecommendationRecord;
use crate::models::EntityId;
use crate::slots::chat::{ChatReply, ChatTurn};
use crate::statistics::view::StatisticsPayload;

#[cfg(test)]
pub mod testing;

const MAX_ATTEMPTS: u32 = 3;
const BASE_BACKOFF_MS: u64 = 250;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

// ────────────────────────────────────────────────────────────────────────────
// Wire payloads
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RecommendResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    recommendations: Vec<RecommendationRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommonFeatures {
    #[serde(default, deserialize_with = "null_as_default")]
    pub programs: Vec<String>,
}

/// Comparison enrichment, keyed by the ids that were submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEnrichment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub colleges: Vec<CatalogEntity>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub common_features: CommonFeatures,
}

#[derive(Debug, Serialize)]
struct CompareRequest<'a> {
    college_ids: &'a [EntityId],
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    history: &'a [ChatTurn],
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    error: Option<String>,
    message: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Everything the service needs from the remote recommender. Carried in
/// `AppState` as `Arc<dyn RecommendationService>`.
#[async_trait]
pub trait RecommendationService: Send + Sync {
    async fn catalog(&self) -> Result<Vec<CatalogEntity>, UpstreamError>;

    async fn recommend(&self, form: &FormState)
        -> Result<Vec<RecommendationRecord>, UpstreamError>;

    async fn compare(&self, ids: &[EntityId]) -> Result<ComparisonEnrichment, UpstreamError>;

    async fn statistics(&self) -> Result<StatisticsPayload, UpstreamError>;

    async fn chat(&self, message: &str, history: &[ChatTurn]) -> Result<ChatReply, UpstreamError>;

    async fn feedback(&self, submission: &FeedbackSubmission) -> Result<(), UpstreamError>;
}

// ────────────────────────────────────────────────────────────────────────────
// HttpRecommender (reqwest)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct HttpRecommender {
    client: Client,
    base_url: String,
}

impl HttpRecommender {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Sends one request, retrying transport errors and 5xx responses with
    /// exponential backoff. 4xx responses are returned immediately.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<String, UpstreamError> {
        self.send_with_attempts(method, path, body, MAX_ATTEMPTS)
            .await
    }

    /// Single attempt, for calls that are not safe to repeat.
    async fn send_once(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<String, UpstreamError> {
        self.send_with_attempts(method, path, body, 1).await
    }

    async fn send_with_attempts(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        max_attempts: u32,
    ) -> Result<String, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        let mut last_error: Option<UpstreamError> = None;

        for attempt in 0..max_attempts {
            if attempt > 0 {
                let delay = Duration::from_millis(BASE_BACKOFF_MS << (attempt - 1));
                warn!(
                    "Upstream {} {} attempt {} failed, retrying after {}ms...",
                    method,
                    path,
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self.client.request(method.clone(), &url);
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(UpstreamError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            let text = response.text().await?;

            if status.is_server_error() {
                last_error = Some(UpstreamError::Api {
                    status: status.as_u16(),
                    message: error_message(&text),
                });
                continue;
            }

            if !status.is_success() {
                return Err(UpstreamError::Api {
                    status: status.as_u16(),
                    message: error_message(&text),
                });
            }

            debug!("Upstream {} {} -> {} ({} bytes)", method, path, status, text.len());
            return Ok(text);
        }

        Err(last_error.unwrap_or(UpstreamError::Api {
            status: 503,
            message: format!("no response after {max_attempts} attempts"),
        }))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, UpstreamError> {
        let text = self.send(Method::GET, path, None).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, UpstreamError> {
        let body = serde_json::to_value(body)?;
        let text = self.send(Method::POST, path, Some(&body)).await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl RecommendationService for HttpRecommender {
    async fn catalog(&self) -> Result<Vec<CatalogEntity>, UpstreamError> {
        let catalog: Vec<CatalogEntity> = self.get_json("/api/colleges").await?;
        info!("Loaded catalog ({} colleges)", catalog.len());
        Ok(catalog)
    }

    async fn recommend(
        &self,
        form: &FormState,
    ) -> Result<Vec<RecommendationRecord>, UpstreamError> {
        let response: RecommendResponse = self.post_json("/api/recommend", form).await?;
        info!("Received {} recommendations", response.recommendations.len());
        Ok(response.recommendations)
    }

    async fn compare(&self, ids: &[EntityId]) -> Result<ComparisonEnrichment, UpstreamError> {
        self.post_json("/api/compare", &CompareRequest { college_ids: ids })
            .await
    }

    async fn statistics(&self) -> Result<StatisticsPayload, UpstreamError> {
        self.get_json("/api/statistics").await
    }

    async fn chat(&self, message: &str, history: &[ChatTurn]) -> Result<ChatReply, UpstreamError> {
        self.post_json("/api/chatbot", &ChatRequest { message, history })
            .await
    }

    async fn feedback(&self, submission: &FeedbackSubmission) -> Result<(), UpstreamError> {
        let body = serde_json::to_value(submission)?;
        // A retried POST would record the rating twice.
        self.send_once(Method::POST, "/api/feedback", Some(&body))
            .await?;
        Ok(())
    }
}

/// Pulls a human-readable message out of an upstream error body, falling back
/// to the raw text.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<UpstreamErrorBody>(body) {
        Ok(UpstreamErrorBody {
            message: Some(message),
            ..
        }) => message,
        Ok(UpstreamErrorBody {
            error: Some(error), ..
        }) => error,
        _ => body.to_string(),
    }
}
