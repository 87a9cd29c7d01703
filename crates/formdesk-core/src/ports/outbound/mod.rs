//! Outbound ports (Repository traits)
//!
//! Hexagonal architecture: these are the interfaces that infrastructure must implement.
//! Each repository stands in for one document-store collection.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::aggregates::{Form, FormResponse, Notification, UserProfile};
use crate::domain::value_objects::{EntityId, ResponseAnnotations};
use crate::domain::DomainEvent;

/// Form repository port (`forms` collection)
#[async_trait]
pub trait FormRepository: Send + Sync {
    /// Find form by ID
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Form>, RepositoryError>;

    /// Find forms by owner
    async fn find_by_owner(&self, owner_id: &EntityId) -> Result<Vec<Form>, RepositoryError>;

    /// Save form (insert or update)
    ///
    /// Updating an existing form keeps its stored view and response counters.
    async fn save(&self, form: &Form) -> Result<(), RepositoryError>;

    /// Delete form
    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError>;

    /// Count one public view in place
    async fn increment_views(&self, id: &EntityId) -> Result<(), RepositoryError>;

    /// Add `delta` to the response counter in place, floored at zero
    async fn increment_responses(&self, id: &EntityId, delta: i64) -> Result<(), RepositoryError>;
}

/// Response repository port (`formResponses` collection)
#[async_trait]
pub trait ResponseRepository: Send + Sync {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<FormResponse>, RepositoryError>;

    /// All responses of one form, in no particular order
    async fn find_by_form(&self, form_id: &EntityId) -> Result<Vec<FormResponse>, RepositoryError>;

    async fn save(&self, response: &FormResponse) -> Result<(), RepositoryError>;

    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError>;
}

/// Notification repository port (`notifications` collection)
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Notification>, RepositoryError>;

    async fn find_by_owner(&self, owner_id: &EntityId) -> Result<Vec<Notification>, RepositoryError>;

    async fn save(&self, notification: &Notification) -> Result<(), RepositoryError>;

    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError>;
}

/// User profile repository port (`users` collection)
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<UserProfile>, RepositoryError>;

    async fn save(&self, profile: &UserProfile) -> Result<(), RepositoryError>;
}

/// Edit applied to one form's annotations
pub type AnnotationChange = Box<dyn FnOnce(&mut ResponseAnnotations) + Send>;

/// Local, non-authoritative star/flag/note storage keyed by form id
#[async_trait]
pub trait AnnotationStore: Send + Sync {
    /// Annotations for a form; empty when nothing was stored yet
    async fn load(&self, form_id: &EntityId) -> Result<ResponseAnnotations, RepositoryError>;

    /// Load, apply `change` and store, with no other update to the same form in between
    async fn update(&self, form_id: &EntityId, change: AnnotationChange) -> Result<ResponseAnnotations, RepositoryError>;

    async fn remove(&self, form_id: &EntityId) -> Result<(), RepositoryError>;
}

/// Event publisher port
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish domain events
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), RepositoryError>;
}

/// Repository error type
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
