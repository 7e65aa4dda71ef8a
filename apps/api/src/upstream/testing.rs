//! In-memory `RecommendationService` for handler and exchange tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ComparisonEnrichment, RecommendationService, UpstreamError};
use crate::feedback::FeedbackSubmission;
use crate::models::catalog::CatalogEntity;
use crate::models::form::FormState;
use crate::models::record::RecommendationRecord;
use crate::models::EntityId;
use crate::slots::chat::{ChatReply, ChatTurn};
use crate::statistics::view::StatisticsPayload;

#[derive(Default)]
pub struct StubService {
    catalog: Vec<CatalogEntity>,
    records: Vec<RecommendationRecord>,
    statistics: StatisticsPayload,
    chat_reply: ChatReply,
    fail: bool,
    calls: AtomicUsize,
    chat_history: Mutex<Vec<ChatTurn>>,
    feedback: Mutex<Vec<FeedbackSubmission>>,
}

impl StubService {
    pub fn with_catalog(mut self, catalog: Vec<CatalogEntity>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_records(mut self, records: Vec<RecommendationRecord>) -> Self {
        self.records = records;
        self
    }

    pub fn with_statistics(mut self, statistics: StatisticsPayload) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn with_chat_reply(mut self, reply: ChatReply) -> Self {
        self.chat_reply = reply;
        self
    }

    /// Every call fails with a 503.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Number of upstream calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_chat_history(&self) -> Vec<ChatTurn> {
        self.chat_history
            .lock()
            .map(|h| h.clone())
            .unwrap_or_default()
    }

    pub fn submitted_feedback(&self) -> Vec<FeedbackSubmission> {
        self.feedback.lock().map(|f| f.clone()).unwrap_or_default()
    }

    fn enter(&self) -> Result<(), UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(UpstreamError::Api {
                status: 503,
                message: "stub unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RecommendationService for StubService {
    async fn catalog(&self) -> Result<Vec<CatalogEntity>, UpstreamError> {
        self.enter()?;
        Ok(self.catalog.clone())
    }

    async fn recommend(
        &self,
        _form: &FormState,
    ) -> Result<Vec<RecommendationRecord>, UpstreamError> {
        self.enter()?;
        Ok(self.records.clone())
    }

    async fn compare(&self, ids: &[EntityId]) -> Result<ComparisonEnrichment, UpstreamError> {
        self.enter()?;
        Ok(ComparisonEnrichment {
            colleges: self
                .catalog
                .iter()
                .filter(|c| ids.contains(&c.id))
                .cloned()
                .collect(),
            ..ComparisonEnrichment::default()
        })
    }

    async fn statistics(&self) -> Result<StatisticsPayload, UpstreamError> {
        self.enter()?;
        Ok(self.statistics.clone())
    }

    async fn chat(&self, _message: &str, history: &[ChatTurn]) -> Result<ChatReply, UpstreamError> {
        self.enter()?;
        if let Ok(mut seen) = self.chat_history.lock() {
            *seen = history.to_vec();
        }
        Ok(self.chat_reply.clone())
    }

    async fn feedback(&self, submission: &FeedbackSubmission) -> Result<(), UpstreamError> {
        self.enter()?;
        if let Ok(mut stored) = self.feedback.lock() {
            stored.push(submission.clone());
        }
        Ok(())
    }
}
