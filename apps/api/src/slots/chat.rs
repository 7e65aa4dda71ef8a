//! Chat exchange: one user turn against the conversational service, with the
//! extracted slots folded into the form.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::form::FormState;
use crate::slots::merge::{merge_with_policy, ExtractedData, MergePolicy};
use crate::upstream::RecommendationService;

pub const GREETING: &str = "Hello! I can help you find suitable colleges. Tell me about yourself, or fill out the form on the left.";
pub const DEFAULT_ACK: &str = "I understand. Please continue filling the form.";
pub const APOLOGY: &str =
    "Sorry, I encountered an error. Please try again or fill the form directly.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Bot,
}

/// One line of the chat transcript. Serialized with a `type` tag because the
/// conversational service expects its history in that shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    #[serde(rename = "type")]
    pub speaker: Speaker,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Bot,
            text: text.into(),
        }
    }
}

/// Transcript a fresh session starts with.
pub fn initial_transcript() -> Vec<ChatTurn> {
    vec![ChatTurn::bot(GREETING)]
}

/// Payload returned by the conversational service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub extracted_data: Option<ExtractedData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatOutcome {
    pub reply: String,
    pub form: FormState,
    pub transcript: Vec<ChatTurn>,
    /// True when the reply carried at least one slot that reached the form.
    pub form_updated: bool,
}

/// Applies a service reply to the form and transcript. Pure.
pub fn apply_reply(
    form: &FormState,
    mut transcript: Vec<ChatTurn>,
    reply: ChatReply,
    policy: MergePolicy,
) -> ChatOutcome {
    let text = reply
        .reply
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ACK.to_string());
    transcript.push(ChatTurn::bot(text.clone()));

    let next_form = match reply.extracted_data {
        Some(extracted) if !extracted.is_empty() => merge_with_policy(form, &extracted, policy),
        _ => form.clone(),
    };

    ChatOutcome {
        reply: text,
        form_updated: next_form != *form,
        form: next_form,
        transcript,
    }
}

/// Sends `message` to the conversational service and merges what it extracted.
///
/// An upstream failure is not an error for the caller: the transcript gets an
/// apology turn and the form is returned unchanged.
pub async fn exchange(
    service: &dyn RecommendationService,
    message: &str,
    form: &FormState,
    transcript: Vec<ChatTurn>,
    policy: MergePolicy,
) -> Result<ChatOutcome, AppError> {
    if message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    // History is what the user saw before sending this message.
    let history = transcript.clone();
    let mut transcript = transcript;
    transcript.push(ChatTurn::user(message));

    match service.chat(message, &history).await {
        Ok(reply) => {
            let outcome = apply_reply(form, transcript, reply, policy);
            info!("Chat turn handled (form_updated={})", outcome.form_updated);
            Ok(outcome)
        }
        Err(e) => {
            warn!("Conversational service failed: {e}");
            transcript.push(ChatTurn::bot(APOLOGY));
            Ok(ChatOutcome {
                reply: APOLOGY.to_string(),
                form: form.clone(),
                transcript,
                form_updated: false,
            })
        }
    }
}
