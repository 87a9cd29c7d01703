//! Public submission flow

use std::sync::Arc;
use async_trait::async_trait;

use crate::application::commands::publish_events;
use crate::application::dto::{PublicFormView, SubmitResponseCommand};
use crate::domain::aggregates::{Form, FormError, FormResponse};
use crate::domain::services::SubmissionValidator;
use crate::domain::value_objects::EntityId;
use crate::ports::inbound::{SubmissionUseCases, UseCaseError};
use crate::ports::outbound::{EventPublisher, FormRepository, ResponseRepository};

pub struct SubmissionService {
    forms: Arc<dyn FormRepository>,
    responses: Arc<dyn ResponseRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl SubmissionService {
    pub fn new(
        forms: Arc<dyn FormRepository>,
        responses: Arc<dyn ResponseRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            forms,
            responses,
            event_publisher,
        }
    }

    /// Drafts are reported as missing to the public
    async fn load_published(&self, form_id: &EntityId) -> Result<Form, UseCaseError> {
        self.forms
            .find_by_id(form_id)
            .await?
            .filter(Form::is_published)
            .ok_or_else(|| UseCaseError::NotFound(format!("Form {} not found", form_id)))
    }
}

#[async_trait]
impl SubmissionUseCases for SubmissionService {
    async fn view_form(&self, form_id: &EntityId) -> Result<PublicFormView, UseCaseError> {
        let form = self.load_published(form_id).await?;

        // A lost view count should not keep the form from rendering.
        if let Err(e) = self.forms.increment_views(form_id).await {
            tracing::warn!(form_id = %form_id, error = %e, "failed to record form view");
        }

        Ok(PublicFormView::from(&form))
    }

    async fn submit(&self, command: SubmitResponseCommand) -> Result<FormResponse, UseCaseError> {
        let mut form = self
            .forms
            .find_by_id(&command.form_id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound(format!("Form {} not found", command.form_id)))?;

        if !form.is_published() {
            return Err(UseCaseError::Domain(FormError::NotPublished));
        }

        if let Err(errors) = SubmissionValidator::validate(form.fields(), &command.answers) {
            tracing::warn!(form_id = %command.form_id, errors = errors.len(), "submission rejected");
            return Err(errors.into());
        }

        // Only answers to fields on the form are kept.
        let answers = command
            .answers
            .into_iter()
            .filter(|(field_id, _)| form.fields().contains(field_id))
            .collect();

        let response = FormResponse::create(command.form_id.clone(), answers, command.user_agent);
        self.responses.save(&response).await.map_err(|e| {
            tracing::error!(form_id = %command.form_id, error = %e, "failed to store response");
            e
        })?;

        form.record_response(response.id().clone())?;
        if let Err(e) = self.forms.increment_responses(&command.form_id, 1).await {
            tracing::warn!(form_id = %command.form_id, error = %e, "failed to update response counter");
        }

        tracing::info!(form_id = %command.form_id, response_id = %response.id(), "response received");
        publish_events(self.event_publisher.as_ref(), form.take_events()).await;

        Ok(response)
    }
}
