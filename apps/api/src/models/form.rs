use serde::{Deserialize, Serialize};

use crate::models::{null_as_default, BudgetRange};

/// Location sentinel meaning "no preference".
pub const ANY_LOCATION: &str = "Any";

pub const STREAMS: &[&str] = &["Science", "Management", "Commerce", "Humanities"];
pub const BUDGETS: &[&str] = &["low", "medium", "high"];

/// The five recognized form slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Stream,
    Gpa,
    PreferredProgram,
    Location,
    BudgetRange,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Stream,
        FormField::Gpa,
        FormField::PreferredProgram,
        FormField::Location,
        FormField::BudgetRange,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FormField::Stream => "stream",
            FormField::Gpa => "gpa",
            FormField::PreferredProgram => "preferred_program",
            FormField::Location => "location",
            FormField::BudgetRange => "budget_range",
        }
    }

    /// Exact, case-sensitive lookup. Anything else is not a slot.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// Canonical student form state. Every slot is kept as the raw string the
/// user (or the assistant) supplied; validation happens at request time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    #[serde(default, deserialize_with = "null_as_default")]
    pub stream: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gpa: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub preferred_program: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub budget_range: String,
}

impl FormState {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Stream => &self.stream,
            FormField::Gpa => &self.gpa,
            FormField::PreferredProgram => &self.preferred_program,
            FormField::Location => &self.location,
            FormField::BudgetRange => &self.budget_range,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Stream => self.stream = value,
            FormField::Gpa => self.gpa = value,
            FormField::PreferredProgram => self.preferred_program = value,
            FormField::Location => self.location = value,
            FormField::BudgetRange => self.budget_range = value,
        }
    }

    /// Required slots that are still blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        FormField::ALL
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .map(FormField::key)
            .collect()
    }

    /// Request-time validation. Returns one message per offending slot;
    /// empty means the form may be submitted.
    pub fn validate(&self) -> Vec<String> {
        let mut problems: Vec<String> = self
            .missing_fields()
            .into_iter()
            .map(|key| format!("{key} is required"))
            .collect();

        if !self.stream.is_empty() && !STREAMS.contains(&self.stream.as_str()) {
            problems.push(format!(
                "stream must be one of {}, got '{}'",
                STREAMS.join(", "),
                self.stream
            ));
        }

        if !self.gpa.trim().is_empty() {
            match self.gpa.trim().parse::<f64>() {
                Ok(gpa) if (0.0..=4.0).contains(&gpa) => {}
                Ok(gpa) => problems.push(format!("gpa must be between 0 and 4, got {gpa}")),
                Err(_) => problems.push(format!("gpa must be a number, got '{}'", self.gpa)),
            }
        }

        let budget_known = BudgetRange::from(self.budget_range.clone()).is_known();
        if !self.budget_range.is_empty() && !budget_known {
            problems.push(format!(
                "budget_range must be one of {}, got '{}'",
                BUDGETS.join(", "),
                self.budget_range
            ));
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> FormState {
        FormState {
            stream: "Science".to_string(),
            gpa: "3.5".to_string(),
            preferred_program: "Computer Engineering".to_string(),
            location: ANY_LOCATION.to_string(),
            budget_range: "medium".to_string(),
        }
    }

    #[test]
    fn test_from_key_is_exact() {
        assert_eq!(FormField::from_key("gpa"), Some(FormField::Gpa));
        assert_eq!(FormField::from_key("GPA"), None);
        assert_eq!(FormField::from_key("interests"), None);
    }

    #[test]
    fn test_serialized_form_has_exactly_five_keys() {
        let value = serde_json::to_value(FormState::default()).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["stream", "gpa", "preferred_program", "location", "budget_range"]
        );
    }

    #[test]
    fn test_missing_fields_lists_blank_slots() {
        let mut form = complete_form();
        form.gpa = "  ".to_string();
        form.location.clear();
        assert_eq!(form.missing_fields(), vec!["gpa", "location"]);
    }

    #[test]
    fn test_complete_form_validates() {
        assert!(complete_form().validate().is_empty());
    }

    #[test]
    fn test_validate_rejects_out_of_range_gpa() {
        let mut form = complete_form();
        form.gpa = "4.2".to_string();
        let problems = form.validate();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("between 0 and 4"));
    }

    #[test]
    fn test_validate_rejects_non_numeric_gpa_and_unknown_enums() {
        let form = FormState {
            stream: "Arts".to_string(),
            gpa: "three".to_string(),
            budget_range: "Medium".to_string(),
            ..complete_form()
        };
        let problems = form.validate();
        assert_eq!(problems.len(), 3);
        assert!(problems.iter().any(|p| p.starts_with("stream")));
        assert!(problems.iter().any(|p| p.contains("must be a number")));
        assert!(problems.iter().any(|p| p.starts_with("budget_range")));
    }
}
