//! FormDesk form builder
//!
//! Form building, public submission and response management following
//! Domain-Driven Design (DDD) and hexagonal architecture.
//!
//! ## Architecture
//!
//! - **Domain Layer**: Aggregates, value objects, domain events, pure services
//! - **Application Layer**: Use case orchestration, DTOs
//! - **Ports Layer**: Hexagonal architecture interfaces
//! - **Infrastructure Layer**: In-memory repositories, annotation files, event fan-out
//!
//! ## Key Aggregates
//!
//! - **Form**: Ordered field list, settings, draft/published lifecycle, counters
//! - **FormResponse**: One immutable submission keyed by field id
//! - **Notification**: Inbox entry produced from a domain event
//! - **UserProfile**: Account details shown on the profile page
//!
//! ## Features
//!
//! - Field list editing with drag-and-drop reordering
//! - Per-field submission validation
//! - Response search, filtering, sorting, pagination and bulk actions
//! - Star/flag/note annotations kept outside the document store
//! - Dashboard and per-form analytics
//! - Notification fan-out for every form lifecycle event

pub mod domain;
pub mod application;
pub mod ports;
pub mod infrastructure;

// Re-exports for convenience
pub use domain::aggregates::{Form, FormError, FormResponse, FormStatus, Notification, NotificationKind, ProfilePatch, UserProfile};
pub use domain::value_objects::{DeviceType, EntityId, Field, FieldId, FieldKind, FieldList, FormSettings, ResponseAnnotations};
pub use domain::events::{DomainEvent, FormEvent, ResponseEvent};
pub use application::{FormService, InsightService, NotificationService, ProfileService, ResponseService, SubmissionService};
pub use ports::inbound::{
    FormUseCases, InsightUseCases, NotificationUseCases, ProfileUseCases, ResponseUseCases, SubmissionUseCases,
    UseCaseError,
};
pub use ports::outbound::{
    AnnotationStore, EventPublisher, FormRepository, NotificationRepository, RepositoryError, ResponseRepository,
    UserRepository,
};
