//! Form Aggregate
//!
//! Aggregate root for a designed form: its ordered fields, presentation
//! settings, publication status and counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::events::{DomainEvent, FormEvent, ResponseEvent};
use crate::domain::value_objects::{EntityId, FieldList, FormSettings};

const UNTITLED: &str = "Untitled Form";

/// Form aggregate root
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Form {
    id: EntityId,
    owner_id: EntityId,
    title: String,
    description: String,
    fields: FieldList,
    settings: FormSettings,
    status: FormStatus,
    response_count: u64,
    view_count: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    published_at: Option<DateTime<Utc>>,
    // Domain events accumulated during operations
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

impl Form {
    /// Create a new draft form with no fields
    pub fn create(owner_id: EntityId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::create_with_fields(owner_id, title, description, FieldList::new())
    }

    /// Create a new draft form with an initial field list
    pub fn create_with_fields(
        owner_id: EntityId,
        title: impl Into<String>,
        description: impl Into<String>,
        fields: FieldList,
    ) -> Self {
        let now = Utc::now();
        let id = EntityId::new();
        let title = normalize_title(title.into());

        let mut form = Self {
            id: id.clone(),
            owner_id: owner_id.clone(),
            title: title.clone(),
            description: description.into(),
            fields,
            settings: FormSettings::default(),
            status: FormStatus::Draft,
            response_count: 0,
            view_count: 0,
            created_at: now,
            updated_at: now,
            published_at: None,
            events: vec![],
        };

        form.raise_event(DomainEvent::Form(FormEvent::Created {
            form_id: id,
            owner_id,
            title,
            created_at: now,
        }));

        form
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn owner_id(&self) -> &EntityId { &self.owner_id }
    pub fn title(&self) -> &str { &self.title }
    pub fn description(&self) -> &str { &self.description }
    pub fn fields(&self) -> &FieldList { &self.fields }
    pub fn settings(&self) -> &FormSettings { &self.settings }
    pub fn status(&self) -> FormStatus { self.status }
    pub fn response_count(&self) -> u64 { self.response_count }
    pub fn view_count(&self) -> u64 { self.view_count }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }
    pub fn published_at(&self) -> Option<DateTime<Utc>> { self.published_at }

    pub fn is_owned_by(&self, user_id: &EntityId) -> bool {
        &self.owner_id == user_id
    }

    pub fn is_published(&self) -> bool {
        self.status == FormStatus::Published
    }

    /// Public path of the submission page
    pub fn share_path(&self) -> String {
        format!("/form/{}", self.id)
    }

    // =========================================================================
    // Business Operations
    // =========================================================================

    /// Change title and/or description
    pub fn update_details(&mut self, title: Option<String>, description: Option<String>) {
        if let Some(title) = title {
            self.title = normalize_title(title);
        }
        if let Some(description) = description {
            self.description = description;
        }
        self.mark_updated();
    }

    /// Replace the whole field list (one document write from the builder)
    pub fn replace_fields(&mut self, fields: FieldList) {
        self.fields = fields;
        self.mark_updated();
    }

    pub fn update_settings(&mut self, settings: FormSettings) {
        self.settings = settings;
        self.mark_updated();
    }

    /// Make the form publicly viewable and submittable
    pub fn publish(&mut self) -> Result<(), FormError> {
        if self.is_published() {
            return Err(FormError::AlreadyPublished);
        }

        let now = Utc::now();
        self.status = FormStatus::Published;
        self.published_at = Some(now);
        self.updated_at = now;

        self.raise_event(DomainEvent::Form(FormEvent::Published {
            form_id: self.id.clone(),
            owner_id: self.owner_id.clone(),
            title: self.title.clone(),
            published_at: now,
        }));

        Ok(())
    }

    /// Take the form back to draft
    pub fn unpublish(&mut self) -> Result<(), FormError> {
        if !self.is_published() {
            return Err(FormError::NotPublished);
        }
        self.status = FormStatus::Draft;
        self.mark_updated();
        Ok(())
    }

    /// Copy into a new draft form owned by `owner_id`
    pub fn duplicate(&self, owner_id: EntityId) -> Form {
        let mut copy = Form::create_with_fields(
            owner_id.clone(),
            format!("{} (Copy)", self.title),
            self.description.clone(),
            self.fields.clone(),
        );
        copy.settings = self.settings.clone();

        // A duplicate announces itself as such rather than as a new form.
        copy.events.clear();
        let title = copy.title.clone();
        let form_id = copy.id.clone();
        copy.raise_event(DomainEvent::Form(FormEvent::Duplicated {
            form_id,
            source_form_id: self.id.clone(),
            owner_id,
            title,
        }));

        copy
    }

    /// Produce the public share path; drafts cannot be shared
    pub fn share(&mut self) -> Result<String, FormError> {
        if !self.is_published() {
            return Err(FormError::NotPublished);
        }

        let share_path = self.share_path();
        self.raise_event(DomainEvent::Form(FormEvent::Shared {
            form_id: self.id.clone(),
            owner_id: self.owner_id.clone(),
            title: self.title.clone(),
            share_path: share_path.clone(),
        }));

        Ok(share_path)
    }

    /// Count a public view
    pub fn record_view(&mut self) {
        self.view_count += 1;
    }

    /// Count an accepted submission
    pub fn record_response(&mut self, response_id: EntityId) -> Result<(), FormError> {
        if !self.is_published() {
            return Err(FormError::NotPublished);
        }

        let now = Utc::now();
        self.response_count += 1;

        self.raise_event(DomainEvent::Response(ResponseEvent::Received {
            response_id,
            form_id: self.id.clone(),
            owner_id: self.owner_id.clone(),
            form_title: self.title.clone(),
            received_at: now,
        }));

        Ok(())
    }

    /// Shift the response counter by `delta`, never below zero
    pub fn adjust_response_count(&mut self, delta: i64) {
        self.response_count = if delta < 0 {
            self.response_count.saturating_sub(delta.unsigned_abs())
        } else {
            self.response_count.saturating_add(delta.unsigned_abs())
        };
    }

    /// Take the counters of the stored copy of this form
    pub(crate) fn carry_counters(&mut self, stored: &Form) {
        self.response_count = stored.response_count;
        self.view_count = stored.view_count;
    }

    /// Consume the form, yielding its pending events followed by `Deleted`
    pub fn delete(mut self) -> Vec<DomainEvent> {
        let event = DomainEvent::Form(FormEvent::Deleted {
            form_id: self.id.clone(),
            owner_id: self.owner_id.clone(),
            title: self.title.clone(),
            deleted_at: Utc::now(),
        });
        self.raise_event(event);
        self.take_events()
    }

    // =========================================================================
    // Domain Events
    // =========================================================================

    /// Get and clear accumulated domain events
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise_event(&mut self, event: DomainEvent) {
        self.events.push(event);
    }

    fn mark_updated(&mut self) {
        self.updated_at = Utc::now();
        self.raise_event(DomainEvent::Form(FormEvent::Updated {
            form_id: self.id.clone(),
            owner_id: self.owner_id.clone(),
            title: self.title.clone(),
            updated_at: self.updated_at,
        }));
    }
}

fn normalize_title(title: String) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        UNTITLED.to_string()
    } else {
        trimmed.to_string()
    }
}

// =============================================================================
// Supporting Types
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    #[default]
    Draft,
    Published,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Form is already published")]
    AlreadyPublished,

    #[error("Form is not published")]
    NotPublished,
}
