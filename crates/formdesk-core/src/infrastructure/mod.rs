//! Infrastructure layer
//!
//! Concrete adapters for the outbound ports.

pub mod persistence;
pub mod annotations;
pub mod events;

pub use persistence::{
    InMemoryFormRepository, InMemoryNotificationRepository, InMemoryResponseRepository,
    InMemoryUserRepository,
};
pub use annotations::{InMemoryAnnotationStore, JsonFileAnnotationStore};
pub use events::NotifyingEventPublisher;
