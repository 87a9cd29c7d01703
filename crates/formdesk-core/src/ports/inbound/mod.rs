//! Inbound ports (Use case traits)
//!
//! Hexagonal architecture: application service interfaces. Every owner-side
//! operation takes the authenticated user's id as `owner`.

use async_trait::async_trait;
use thiserror::Error;

use crate::application::dto::*;
use crate::domain::aggregates::{Form, FormError, FormResponse, Notification, ProfilePatch, UserProfile};
use crate::domain::services::{Dashboard, FormAnalytics, Page, ResponseQuery, ValidationErrors};
use crate::domain::value_objects::{EntityId, Field, FormSettings};
use crate::ports::outbound::RepositoryError;

/// Form builder use cases
#[async_trait]
pub trait FormUseCases: Send + Sync {
    /// Create an empty draft form
    async fn create_form(&self, owner: &EntityId, command: CreateFormCommand) -> Result<Form, UseCaseError>;

    /// Create a draft form from a catalog template
    async fn create_from_template(&self, owner: &EntityId, template_id: &str) -> Result<Form, UseCaseError>;

    async fn get_form(&self, owner: &EntityId, form_id: &EntityId) -> Result<Form, UseCaseError>;

    /// Owner's forms, most recently updated first
    async fn list_forms(&self, owner: &EntityId) -> Result<Vec<Form>, UseCaseError>;

    async fn update_details(&self, owner: &EntityId, form_id: &EntityId, command: UpdateFormCommand) -> Result<Form, UseCaseError>;

    /// Persist the builder's whole field list as one write
    /// Replace the field list; duplicate or blank ids are a validation error
    async fn save_fields(&self, owner: &EntityId, form_id: &EntityId, fields: Vec<Field>) -> Result<Form, UseCaseError>;

    async fn update_settings(&self, owner: &EntityId, form_id: &EntityId, settings: FormSettings) -> Result<Form, UseCaseError>;

    async fn publish_form(&self, owner: &EntityId, form_id: &EntityId) -> Result<Form, UseCaseError>;

    async fn unpublish_form(&self, owner: &EntityId, form_id: &EntityId) -> Result<Form, UseCaseError>;

    async fn duplicate_form(&self, owner: &EntityId, form_id: &EntityId) -> Result<Form, UseCaseError>;

    async fn share_form(&self, owner: &EntityId, form_id: &EntityId) -> Result<ShareLink, UseCaseError>;

    /// Delete a form and, one by one, its responses
    async fn delete_form(&self, owner: &EntityId, form_id: &EntityId) -> Result<DeleteFormOutcome, UseCaseError>;
}

/// Public viewer use cases (no owner)
#[async_trait]
pub trait SubmissionUseCases: Send + Sync {
    /// Load a published form for rendering and count the view
    async fn view_form(&self, form_id: &EntityId) -> Result<PublicFormView, UseCaseError>;

    /// Validate and store one submission
    async fn submit(&self, command: SubmitResponseCommand) -> Result<FormResponse, UseCaseError>;
}

/// Response management use cases
#[async_trait]
pub trait ResponseUseCases: Send + Sync {
    async fn list_responses(&self, owner: &EntityId, form_id: &EntityId, query: ResponseQuery) -> Result<Page<ResponseView>, UseCaseError>;

    async fn get_response(&self, owner: &EntityId, form_id: &EntityId, response_id: &EntityId) -> Result<ResponseView, UseCaseError>;

    async fn delete_response(&self, owner: &EntityId, form_id: &EntityId, response_id: &EntityId) -> Result<(), UseCaseError>;

    async fn bulk_delete(&self, owner: &EntityId, form_id: &EntityId, response_ids: Vec<EntityId>) -> Result<BulkOutcome, UseCaseError>;

    async fn set_starred(&self, owner: &EntityId, form_id: &EntityId, response_id: &EntityId, starred: bool) -> Result<ResponseView, UseCaseError>;

    async fn set_flagged(&self, owner: &EntityId, form_id: &EntityId, response_id: &EntityId, flagged: bool) -> Result<ResponseView, UseCaseError>;

    async fn set_note(&self, owner: &EntityId, form_id: &EntityId, response_id: &EntityId, note: Option<String>) -> Result<ResponseView, UseCaseError>;

    async fn bulk_star(&self, owner: &EntityId, form_id: &EntityId, response_ids: Vec<EntityId>, starred: bool) -> Result<BulkOutcome, UseCaseError>;

    async fn bulk_flag(&self, owner: &EntityId, form_id: &EntityId, response_ids: Vec<EntityId>, flagged: bool) -> Result<BulkOutcome, UseCaseError>;
}

/// Notification inbox use cases
#[async_trait]
pub trait NotificationUseCases: Send + Sync {
    /// Newest first
    async fn list_notifications(&self, owner: &EntityId, unread_only: bool) -> Result<Vec<Notification>, UseCaseError>;

    async fn unread_count(&self, owner: &EntityId) -> Result<usize, UseCaseError>;

    async fn mark_read(&self, owner: &EntityId, notification_id: &EntityId) -> Result<Notification, UseCaseError>;

    /// Returns how many notifications changed
    async fn mark_all_read(&self, owner: &EntityId) -> Result<usize, UseCaseError>;

    async fn delete_notification(&self, owner: &EntityId, notification_id: &EntityId) -> Result<(), UseCaseError>;
}

/// Dashboard and analytics use cases
#[async_trait]
pub trait InsightUseCases: Send + Sync {
    async fn form_analytics(&self, owner: &EntityId, form_id: &EntityId, window_days: u32) -> Result<FormAnalytics, UseCaseError>;

    async fn dashboard(&self, owner: &EntityId) -> Result<Dashboard, UseCaseError>;
}

/// Profile use cases
#[async_trait]
pub trait ProfileUseCases: Send + Sync {
    /// Profile of the authenticated user, created empty on first access
    async fn get_profile(&self, owner: &EntityId) -> Result<UserProfile, UseCaseError>;

    async fn update_profile(&self, owner: &EntityId, patch: ProfilePatch) -> Result<UserProfile, UseCaseError>;
}

#[derive(Error, Debug)]
pub enum UseCaseError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Domain error: {0}")]
    Domain(#[from] FormError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<ValidationErrors> for UseCaseError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}
