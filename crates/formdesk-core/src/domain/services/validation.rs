//! Submission validation
//!
//! Per-field checks run before a response is accepted: required-ness,
//! format patterns, length and numeric bounds, and choice membership.

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

use crate::domain::value_objects::{Field, FieldId, FieldKind, FieldList};

const DEFAULT_MAX_RATING: u8 = 5;
const MIN_PHONE_DIGITS: usize = 7;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9\s\-().]{7,20}$").unwrap()
});

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?([\w-]+\.)+[\w-]{2,}(:\d+)?(/\S*)?$").unwrap()
});

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value.trim())
}

pub fn is_valid_phone(value: &str) -> bool {
    let value = value.trim();
    PHONE_PATTERN.is_match(value)
        && value.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

pub fn is_valid_url(value: &str) -> bool {
    URL_PATTERN.is_match(value.trim())
}

/// Field-keyed validation messages
#[derive(Error, Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[error("{} field(s) failed validation", .0.len())]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-entry error set
    pub fn single(key: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(key, message);
        errors
    }

    pub fn add(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.0.insert(key.into(), message.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Validates a set of answers against a form's field list
pub struct SubmissionValidator;

impl SubmissionValidator {
    pub fn validate(
        fields: &FieldList,
        answers: &BTreeMap<FieldId, Value>,
    ) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for field in fields {
            let value = answers.get(&field.id);
            if let Some(message) = Self::check_field(field, value) {
                errors.add(field.id.as_str(), message);
            }
        }

        errors.into_result()
    }

    /// Error message for one field, if any
    pub fn check_field(field: &Field, value: Option<&Value>) -> Option<String> {
        let value = match value {
            Some(v) if !is_blank(v) => v,
            _ if field.required => return Some(format!("{} is required", field.label)),
            _ => return None,
        };

        if field.kind.is_text_like() {
            let Some(text) = value.as_str() else {
                return Some(format!("{} must be text", field.label));
            };
            if let Some(message) = check_length(field, text) {
                return Some(message);
            }
        }

        match field.kind {
            FieldKind::Text | FieldKind::Textarea => None,
            FieldKind::Email => value
                .as_str()
                .filter(|s| !is_valid_email(s))
                .map(|_| "Please enter a valid email address".to_string()),
            FieldKind::Phone => value
                .as_str()
                .filter(|s| !is_valid_phone(s))
                .map(|_| "Please enter a valid phone number".to_string()),
            FieldKind::Url => value
                .as_str()
                .filter(|s| !is_valid_url(s))
                .map(|_| "Please enter a valid URL".to_string()),
            FieldKind::Number => check_number(field, value),
            FieldKind::Date => match value.as_str() {
                Some(s) if NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").is_ok() => None,
                _ => Some("Please enter a valid date".to_string()),
            },
            FieldKind::Radio | FieldKind::Select => match value.as_str() {
                Some(choice) if field.options.iter().any(|o| o == choice) => None,
                _ => Some("Please choose one of the available options".to_string()),
            },
            FieldKind::Checkbox => {
                let chosen: Vec<&str> = match value {
                    Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
                    Value::String(s) => vec![s.as_str()],
                    _ => vec![],
                };
                let all_known = !chosen.is_empty()
                    && chosen.iter().all(|c| field.options.iter().any(|o| o == c));
                if all_known {
                    None
                } else {
                    Some("Please choose from the available options".to_string())
                }
            }
            FieldKind::Rating => {
                let max = field.validation.max_rating.unwrap_or(DEFAULT_MAX_RATING);
                match as_number(value) {
                    Some(n) if n.fract() == 0.0 && n >= 1.0 && n <= f64::from(max) => None,
                    _ => Some(format!("Rating must be between 1 and {}", max)),
                }
            }
            // Uploads arrive as references produced by the storage layer.
            FieldKind::File | FieldKind::Image => None,
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.iter().all(is_blank),
        _ => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn check_length(field: &Field, text: &str) -> Option<String> {
    let len = text.trim().chars().count();
    if let Some(min) = field.validation.min_length {
        if len < min {
            return Some(format!("{} must be at least {} characters", field.label, min));
        }
    }
    if let Some(max) = field.validation.max_length {
        if len > max {
            return Some(format!("{} must be at most {} characters", field.label, max));
        }
    }
    None
}

fn check_number(field: &Field, value: &Value) -> Option<String> {
    let Some(n) = as_number(value) else {
        return Some("Please enter a valid number".to_string());
    };
    if let Some(min) = field.validation.min_value {
        if n < min {
            return Some(format!("{} must be at least {}", field.label, min));
        }
    }
    if let Some(max) = field.validation.max_value {
        if n > max {
            return Some(format!("{} must be at most {}", field.label, max));
        }
    }
    None
}
