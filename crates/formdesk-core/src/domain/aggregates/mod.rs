//! Aggregates module

pub mod form;
pub mod response;
pub mod notification;
pub mod profile;

pub use form::{Form, FormError, FormStatus};
pub use response::{answer_text, FormResponse};
pub use notification::{Notification, NotificationKind};
pub use profile::{ProfilePatch, UserProfile};
