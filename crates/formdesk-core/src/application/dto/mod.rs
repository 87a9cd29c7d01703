//! Data Transfer Objects (DTOs)
//!
//! Objects for transferring data across boundaries.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::aggregates::{Form, FormResponse};
use crate::domain::value_objects::{DeviceType, EntityId, FieldId, FieldList, FormSettings, ResponseAnnotations};

// =============================================================================
// Form Commands
// =============================================================================

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CreateFormCommand {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateFormCommand {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShareLink {
    pub form_id: EntityId,
    pub path: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteFormOutcome {
    pub form_id: EntityId,
    pub responses_deleted: usize,
    pub responses_failed: usize,
}

// =============================================================================
// Submission Commands
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmitResponseCommand {
    pub form_id: EntityId,
    pub answers: BTreeMap<FieldId, Value>,
    #[serde(default)]
    pub user_agent: String,
}

// =============================================================================
// Bulk Actions
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkFailure {
    pub id: EntityId,
    pub reason: String,
}

/// Per-item result of a bulk action; nothing is rolled back
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOutcome {
    pub succeeded: Vec<EntityId>,
    pub failed: Vec<BulkFailure>,
}

impl BulkOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn fail(&mut self, id: EntityId, reason: impl Into<String>) {
        self.failed.push(BulkFailure { id, reason: reason.into() });
    }
}

// =============================================================================
// Views (Read Models)
// =============================================================================

/// What the public viewer needs to render a form
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PublicFormView {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub fields: FieldList,
    pub settings: FormSettings,
}

impl From<&Form> for PublicFormView {
    fn from(form: &Form) -> Self {
        Self {
            id: form.id().clone(),
            title: form.title().to_string(),
            description: form.description().to_string(),
            fields: form.fields().clone(),
            settings: form.settings().clone(),
        }
    }
}

/// A response row together with its owner-side annotations
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponseView {
    #[serde(flatten)]
    pub response: FormResponse,
    pub device: DeviceType,
    pub starred: bool,
    pub flagged: bool,
    pub note: Option<String>,
}

impl ResponseView {
    pub fn new(response: FormResponse, annotations: &ResponseAnnotations) -> Self {
        let id = response.id();
        Self {
            device: response.device(),
            starred: annotations.is_starred(id),
            flagged: annotations.is_flagged(id),
            note: annotations.note(id).map(str::to_string),
            response,
        }
    }
}
