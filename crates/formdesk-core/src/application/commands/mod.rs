//! Command handlers
//!
//! Application services that orchestrate use cases.

mod forms;
mod submissions;
mod responses;
mod notifications;
mod profile;

pub use forms::FormService;
pub use submissions::SubmissionService;
pub use responses::ResponseService;
pub use notifications::NotificationService;
pub use profile::ProfileService;

use crate::domain::aggregates::Form;
use crate::domain::value_objects::EntityId;
use crate::domain::DomainEvent;
use crate::ports::inbound::UseCaseError;
use crate::ports::outbound::{EventPublisher, FormRepository};

/// Load a form and check that `owner` owns it
pub(crate) async fn load_owned_form(
    forms: &dyn FormRepository,
    owner: &EntityId,
    form_id: &EntityId,
) -> Result<Form, UseCaseError> {
    let form = forms
        .find_by_id(form_id)
        .await?
        .ok_or_else(|| UseCaseError::NotFound(format!("Form {} not found", form_id)))?;

    if !form.is_owned_by(owner) {
        return Err(UseCaseError::Forbidden(format!("Form {} belongs to another user", form_id)));
    }

    Ok(form)
}

/// Publish events without failing the calling operation
pub(crate) async fn publish_events(publisher: &dyn EventPublisher, events: Vec<DomainEvent>) {
    if events.is_empty() {
        return;
    }
    let count = events.len();
    if let Err(e) = publisher.publish(events).await {
        tracing::warn!(error = %e, count, "failed to publish domain events");
    }
}
