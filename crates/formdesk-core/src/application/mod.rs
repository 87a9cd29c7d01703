//! Application layer
//!
//! Orchestrates use cases and coordinates domain objects.

pub mod commands;
pub mod queries;
pub mod dto;

pub use commands::{FormService, NotificationService, ProfileService, ResponseService, SubmissionService};
pub use queries::InsightService;
pub use dto::*;
