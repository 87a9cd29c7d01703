//! API Models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use formdesk_core::domain::services::ValidationErrors;

/// Standard API response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorResponse {
                code: code.to_string(),
                message: message.to_string(),
                fields: None,
            }),
        }
    }

    /// Error envelope carrying per-field validation messages
    pub fn invalid(errors: &ValidationErrors) -> Self {
        let fields = errors
            .iter()
            .map(|(key, message)| (key.to_string(), message.to_string()))
            .collect();
        Self {
            success: false,
            data: None,
            error: Some(ErrorResponse {
                code: "validation_failed".into(),
                message: "Please fix the highlighted fields".into(),
                fields: Some(fields),
            }),
        }
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

// ============ Forms ============

/// Form creation request; `template_id` starts from a catalog template
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormCreate {
    pub title: String,
    pub description: String,
    pub template_id: Option<String>,
}

// ============ Responses ============

/// Response table query string
#[derive(Debug, Default, Deserialize)]
pub struct ResponseListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub device: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkAction {
    Delete,
    Star,
    Unstar,
    Flag,
    Unflag,
}

/// Bulk action over selected responses
#[derive(Debug, Serialize, Deserialize)]
pub struct BulkRequest {
    pub action: BulkAction,
    pub ids: Vec<formdesk_core::EntityId>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleRequest {
    pub value: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NoteRequest {
    #[serde(default)]
    pub note: Option<String>,
}

/// Public submission body
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionRequest {
    #[serde(default)]
    pub answers: BTreeMap<formdesk_core::FieldId, serde_json::Value>,
}

// ============ Analytics ============

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsParams {
    pub days: Option<u32>,
}

// ============ Notifications ============

#[derive(Debug, Default, Deserialize)]
pub struct NotificationParams {
    #[serde(default)]
    pub unread: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: usize,
}
