//! Form Response Aggregate
//!
//! One end-user submission. Created once, never updated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::value_objects::{DeviceType, EntityId, FieldId};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormResponse {
    id: EntityId,
    form_id: EntityId,
    answers: BTreeMap<FieldId, Value>,
    submitted_at: DateTime<Utc>,
    user_agent: String,
}

impl FormResponse {
    pub fn create(
        form_id: EntityId,
        answers: BTreeMap<FieldId, Value>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            id: EntityId::new(),
            form_id,
            answers,
            submitted_at: Utc::now(),
            user_agent: user_agent.into(),
        }
    }

    /// Override the submission time (imports and fixtures)
    pub fn with_submitted_at(mut self, submitted_at: DateTime<Utc>) -> Self {
        self.submitted_at = submitted_at;
        self
    }

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn form_id(&self) -> &EntityId { &self.form_id }
    pub fn answers(&self) -> &BTreeMap<FieldId, Value> { &self.answers }
    pub fn submitted_at(&self) -> DateTime<Utc> { self.submitted_at }
    pub fn user_agent(&self) -> &str { &self.user_agent }

    pub fn answer(&self, field_id: &FieldId) -> Option<&Value> {
        self.answers.get(field_id)
    }

    /// Display text of one answer; empty when unanswered
    pub fn answer_text(&self, field_id: &FieldId) -> String {
        self.answer(field_id).map(answer_text).unwrap_or_default()
    }

    pub fn device(&self) -> DeviceType {
        DeviceType::from_user_agent(&self.user_agent)
    }

    /// Case-insensitive match against the response id and every answer
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.id.as_str().to_lowercase().contains(&term)
            || self
                .answers
                .values()
                .any(|value| answer_text(value).to_lowercase().contains(&term))
    }
}

/// Flatten a submitted value to display text
pub fn answer_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(answer_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response_with(answers: Vec<(&str, Value)>) -> FormResponse {
        let answers = answers
            .into_iter()
            .map(|(k, v)| (FieldId::from_string(k), v))
            .collect();
        FormResponse::create(EntityId::new(), answers, "Mozilla/5.0 (iPhone) Mobile")
    }

    #[test]
    fn test_answer_text() {
        assert_eq!(answer_text(&json!("hello")), "hello");
        assert_eq!(answer_text(&json!(["a", "b"])), "a, b");
        assert_eq!(answer_text(&json!(4)), "4");
        assert_eq!(answer_text(&json!(true)), "true");
        assert_eq!(answer_text(&Value::Null), "");
    }

    #[test]
    fn test_matches_searches_values_and_id() {
        let response = response_with(vec![
            ("name", json!("Ada Lovelace")),
            ("topics", json!(["Math", "Engines"])),
        ]);

        assert!(response.matches("lovelace"));
        assert!(response.matches("ENGINES"));
        assert!(response.matches(&response.id().as_str()[..8]));
        assert!(response.matches(""));
        assert!(!response.matches("babbage"));
    }

    #[test]
    fn test_device_from_user_agent() {
        let response = response_with(vec![]);
        assert_eq!(response.device(), DeviceType::Mobile);
    }
}
