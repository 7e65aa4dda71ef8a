//! Slot merging: folds data extracted from conversation into the form state.
//!
//! The conversational service is untrusted input: keys are whitelisted against
//! the five form slots and values are coerced to strings before they touch
//! the form. No range or enum validation happens here; that belongs to the
//! request layer (`FormState::validate`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::models::form::{FormField, FormState};

/// Raw `extracted_data` as delivered by the conversational service.
pub type ExtractedData = Map<String, Value>;

/// How extracted values interact with slots that already hold a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Last write wins, even when the extracted value is empty.
    #[default]
    Overwrite,
    /// Extracted values that are blank after trimming leave the slot alone.
    SkipEmpty,
}

/// Extracted data after whitelisting and coercion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedSlots {
    pub values: Vec<(FormField, String)>,
    pub dropped: Vec<String>,
}

impl ExtractedSlots {
    pub fn from_extracted(extracted: &ExtractedData) -> Self {
        let mut slots = ExtractedSlots::default();

        for (key, value) in extracted {
            match (FormField::from_key(key), coerce_slot_value(value)) {
                (Some(field), Some(text)) => slots.values.push((field, text)),
                _ => slots.dropped.push(key.clone()),
            }
        }

        slots
    }
}

pub fn merge_with_policy(
    current: &FormState,
    extracted: &ExtractedData,
    policy: MergePolicy,
) -> FormState {
    let slots = ExtractedSlots::from_extracted(extracted);

    if !slots.dropped.is_empty() {
        debug!("Dropped non-slot extracted keys: {:?}", slots.dropped);
    }

    let mut next = current.clone();
    for (field, value) in slots.values {
        if policy == MergePolicy::SkipEmpty && value.trim().is_empty() {
            continue;
        }
        next.set(field, value);
    }
    next
}

/// Strings pass through, scalars render to text. Null and containers have no
/// slot representation.
fn coerce_slot_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
