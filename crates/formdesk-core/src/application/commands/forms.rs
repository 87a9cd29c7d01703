//! Form builder application service

use std::sync::Arc;
use async_trait::async_trait;

use crate::application::commands::{load_owned_form, publish_events};
use crate::application::dto::*;
use crate::domain::aggregates::Form;
use crate::domain::services::{FormTemplate, ValidationErrors};
use crate::domain::value_objects::{EntityId, Field, FieldList, FormSettings};
use crate::ports::inbound::{FormUseCases, UseCaseError};
use crate::ports::outbound::{AnnotationStore, EventPublisher, FormRepository, ResponseRepository};

/// Form application service
pub struct FormService {
    forms: Arc<dyn FormRepository>,
    responses: Arc<dyn ResponseRepository>,
    annotations: Arc<dyn AnnotationStore>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl FormService {
    pub fn new(
        forms: Arc<dyn FormRepository>,
        responses: Arc<dyn ResponseRepository>,
        annotations: Arc<dyn AnnotationStore>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            forms,
            responses,
            annotations,
            event_publisher,
        }
    }

    async fn persist(&self, mut form: Form) -> Result<Form, UseCaseError> {
        self.forms.save(&form).await?;
        publish_events(self.event_publisher.as_ref(), form.take_events()).await;
        Ok(form)
    }

    async fn load(&self, owner: &EntityId, form_id: &EntityId) -> Result<Form, UseCaseError> {
        load_owned_form(self.forms.as_ref(), owner, form_id).await
    }
}

#[async_trait]
impl FormUseCases for FormService {
    async fn create_form(&self, owner: &EntityId, command: CreateFormCommand) -> Result<Form, UseCaseError> {
        let form = Form::create(owner.clone(), command.title, command.description);
        tracing::info!(form_id = %form.id(), owner = %owner, "form created");
        self.persist(form).await
    }

    async fn create_from_template(&self, owner: &EntityId, template_id: &str) -> Result<Form, UseCaseError> {
        let template = FormTemplate::find(template_id)
            .ok_or_else(|| UseCaseError::NotFound(format!("Template {} not found", template_id)))?;

        let form = Form::create_with_fields(
            owner.clone(),
            template.name,
            template.description,
            template.build_fields(),
        );
        tracing::info!(form_id = %form.id(), template = template_id, "form created from template");
        self.persist(form).await
    }

    async fn get_form(&self, owner: &EntityId, form_id: &EntityId) -> Result<Form, UseCaseError> {
        self.load(owner, form_id).await
    }

    async fn list_forms(&self, owner: &EntityId) -> Result<Vec<Form>, UseCaseError> {
        let mut forms = self.forms.find_by_owner(owner).await?;
        forms.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));
        Ok(forms)
    }

    async fn update_details(&self, owner: &EntityId, form_id: &EntityId, command: UpdateFormCommand) -> Result<Form, UseCaseError> {
        let mut form = self.load(owner, form_id).await?;
        form.update_details(command.title, command.description);
        self.persist(form).await
    }

    async fn save_fields(&self, owner: &EntityId, form_id: &EntityId, fields: Vec<Field>) -> Result<Form, UseCaseError> {
        let mut form = self.load(owner, form_id).await?;
        let fields = FieldList::from_fields(fields).map_err(|e| ValidationErrors::single("fields", e.to_string()))?;
        tracing::debug!(form_id = %form_id, fields = fields.len(), "saving field list");
        form.replace_fields(fields);
        self.persist(form).await
    }

    async fn update_settings(&self, owner: &EntityId, form_id: &EntityId, settings: FormSettings) -> Result<Form, UseCaseError> {
        let mut form = self.load(owner, form_id).await?;
        form.update_settings(settings);
        self.persist(form).await
    }

    async fn publish_form(&self, owner: &EntityId, form_id: &EntityId) -> Result<Form, UseCaseError> {
        let mut form = self.load(owner, form_id).await?;
        form.publish()?;
        tracing::info!(form_id = %form_id, "form published");
        self.persist(form).await
    }

    async fn unpublish_form(&self, owner: &EntityId, form_id: &EntityId) -> Result<Form, UseCaseError> {
        let mut form = self.load(owner, form_id).await?;
        form.unpublish()?;
        tracing::info!(form_id = %form_id, "form unpublished");
        self.persist(form).await
    }

    async fn duplicate_form(&self, owner: &EntityId, form_id: &EntityId) -> Result<Form, UseCaseError> {
        let source = self.load(owner, form_id).await?;
        let copy = source.duplicate(owner.clone());
        tracing::info!(source = %form_id, form_id = %copy.id(), "form duplicated");
        self.persist(copy).await
    }

    async fn share_form(&self, owner: &EntityId, form_id: &EntityId) -> Result<ShareLink, UseCaseError> {
        let mut form = self.load(owner, form_id).await?;
        let path = form.share()?;
        publish_events(self.event_publisher.as_ref(), form.take_events()).await;
        Ok(ShareLink { form_id: form_id.clone(), path })
    }

    async fn delete_form(&self, owner: &EntityId, form_id: &EntityId) -> Result<DeleteFormOutcome, UseCaseError> {
        let form = self.load(owner, form_id).await?;

        // Not a transaction: responses go one at a time and failures are skipped.
        let responses = self.responses.find_by_form(form_id).await?;
        let mut deleted = 0;
        let mut failed = 0;
        for response in &responses {
            match self.responses.delete(response.id()).await {
                Ok(()) => deleted += 1,
                Err(e) => {
                    failed += 1;
                    tracing::warn!(form_id = %form_id, response_id = %response.id(), error = %e, "failed to delete response");
                }
            }
        }

        self.forms.delete(form_id).await?;
        if let Err(e) = self.annotations.remove(form_id).await {
            tracing::warn!(form_id = %form_id, error = %e, "failed to remove annotations");
        }

        tracing::info!(form_id = %form_id, deleted, failed, "form deleted");
        publish_events(self.event_publisher.as_ref(), form.delete()).await;

        Ok(DeleteFormOutcome {
            form_id: form_id.clone(),
            responses_deleted: deleted,
            responses_failed: failed,
        })
    }
}
