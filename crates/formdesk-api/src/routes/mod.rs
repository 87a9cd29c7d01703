//! API Routes

pub mod health;
pub mod forms;
pub mod responses;
pub mod public;
pub mod notifications;
pub mod insights;
pub mod templates;
pub mod profile;
