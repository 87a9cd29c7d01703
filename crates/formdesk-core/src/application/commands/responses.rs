//! Response management: table queries, deletion and annotations

use std::collections::BTreeSet;
use std::sync::Arc;
use async_trait::async_trait;
use futures::future::join_all;

use crate::application::commands::load_owned_form;
use crate::application::dto::{BulkOutcome, ResponseView};
use crate::domain::aggregates::FormResponse;
use crate::domain::services::{Page, ResponseQuery};
use crate::domain::value_objects::{EntityId, ResponseAnnotations};
use crate::ports::inbound::{ResponseUseCases, UseCaseError};
use crate::ports::outbound::{AnnotationStore, FormRepository, ResponseRepository};

pub struct ResponseService {
    forms: Arc<dyn FormRepository>,
    responses: Arc<dyn ResponseRepository>,
    annotations: Arc<dyn AnnotationStore>,
}

#[derive(Clone, Copy)]
enum Mark {
    Star(bool),
    Flag(bool),
}

impl ResponseService {
    pub fn new(
        forms: Arc<dyn FormRepository>,
        responses: Arc<dyn ResponseRepository>,
        annotations: Arc<dyn AnnotationStore>,
    ) -> Self {
        Self {
            forms,
            responses,
            annotations,
        }
    }

    async fn load_response(&self, form_id: &EntityId, response_id: &EntityId) -> Result<FormResponse, UseCaseError> {
        self.responses
            .find_by_id(response_id)
            .await?
            .filter(|r| r.form_id() == form_id)
            .ok_or_else(|| UseCaseError::NotFound(format!("Response {} not found", response_id)))
    }

    /// Apply one annotation change and return the refreshed row
    async fn annotate(
        &self,
        owner: &EntityId,
        form_id: &EntityId,
        response_id: &EntityId,
        change: impl FnOnce(&mut ResponseAnnotations) + Send + 'static,
    ) -> Result<ResponseView, UseCaseError> {
        load_owned_form(self.forms.as_ref(), owner, form_id).await?;
        let response = self.load_response(form_id, response_id).await?;

        let annotations = self.annotations.update(form_id, Box::new(change)).await?;
        Ok(ResponseView::new(response, &annotations))
    }

    async fn bulk_mark(
        &self,
        owner: &EntityId,
        form_id: &EntityId,
        response_ids: Vec<EntityId>,
        mark: Mark,
    ) -> Result<BulkOutcome, UseCaseError> {
        load_owned_form(self.forms.as_ref(), owner, form_id).await?;
        let known: BTreeSet<EntityId> = self
            .responses
            .find_by_form(form_id)
            .await?
            .into_iter()
            .map(|r| r.id().clone())
            .collect();

        let mut outcome = BulkOutcome::default();
        for id in distinct(response_ids) {
            if known.contains(&id) {
                outcome.succeeded.push(id);
            } else {
                outcome.fail(id, "not found");
            }
        }
        if outcome.succeeded.is_empty() {
            return Ok(outcome);
        }

        let marked = outcome.succeeded.clone();
        self.annotations
            .update(form_id, Box::new(move |annotations: &mut ResponseAnnotations| {
                for id in &marked {
                    match mark {
                        Mark::Star(on) => annotations.set_starred(id, on),
                        Mark::Flag(on) => annotations.set_flagged(id, on),
                    }
                }
            }))
            .await?;
        Ok(outcome)
    }

    /// Lower the stored counter and drop annotations for deleted rows
    async fn forget_deleted(&self, form_id: &EntityId, deleted: &[EntityId]) -> Result<(), UseCaseError> {
        if deleted.is_empty() {
            return Ok(());
        }

        let delta = i64::try_from(deleted.len()).unwrap_or(i64::MAX);
        self.forms.increment_responses(form_id, -delta).await?;

        let forgotten = deleted.to_vec();
        self.annotations
            .update(form_id, Box::new(move |annotations: &mut ResponseAnnotations| {
                for id in &forgotten {
                    annotations.forget(id);
                }
            }))
            .await?;
        Ok(())
    }
}

/// Drop repeated ids, keeping first occurrences in order
fn distinct(ids: Vec<EntityId>) -> Vec<EntityId> {
    let mut seen = BTreeSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

#[async_trait]
impl ResponseUseCases for ResponseService {
    async fn list_responses(&self, owner: &EntityId, form_id: &EntityId, query: ResponseQuery) -> Result<Page<ResponseView>, UseCaseError> {
        load_owned_form(self.forms.as_ref(), owner, form_id).await?;

        let responses = self.responses.find_by_form(form_id).await?;
        let annotations = self.annotations.load(form_id).await?;
        tracing::debug!(form_id = %form_id, total = responses.len(), page = query.page, "listing responses");

        let page = query.run(responses, &annotations);
        Ok(page.map(|response| ResponseView::new(response, &annotations)))
    }

    async fn get_response(&self, owner: &EntityId, form_id: &EntityId, response_id: &EntityId) -> Result<ResponseView, UseCaseError> {
        load_owned_form(self.forms.as_ref(), owner, form_id).await?;
        let response = self.load_response(form_id, response_id).await?;
        let annotations = self.annotations.load(form_id).await?;
        Ok(ResponseView::new(response, &annotations))
    }

    async fn delete_response(&self, owner: &EntityId, form_id: &EntityId, response_id: &EntityId) -> Result<(), UseCaseError> {
        load_owned_form(self.forms.as_ref(), owner, form_id).await?;
        self.load_response(form_id, response_id).await?;

        self.responses.delete(response_id).await?;
        tracing::info!(form_id = %form_id, response_id = %response_id, "response deleted");

        self.forget_deleted(form_id, std::slice::from_ref(response_id)).await
    }

    async fn bulk_delete(&self, owner: &EntityId, form_id: &EntityId, response_ids: Vec<EntityId>) -> Result<BulkOutcome, UseCaseError> {
        load_owned_form(self.forms.as_ref(), owner, form_id).await?;
        let known: BTreeSet<EntityId> = self
            .responses
            .find_by_form(form_id)
            .await?
            .into_iter()
            .map(|r| r.id().clone())
            .collect();

        let mut outcome = BulkOutcome::default();
        let (targets, unknown): (Vec<_>, Vec<_>) = distinct(response_ids).into_iter().partition(|id| known.contains(id));
        for id in unknown {
            outcome.fail(id, "not found");
        }

        // Deletes run concurrently; a failure does not undo the others.
        let results = join_all(targets.iter().map(|id| self.responses.delete(id))).await;
        for (id, result) in targets.into_iter().zip(results) {
            match result {
                Ok(()) => outcome.succeeded.push(id),
                Err(e) => {
                    tracing::warn!(form_id = %form_id, response_id = %id, error = %e, "bulk delete failed");
                    outcome.fail(id, e.to_string());
                }
            }
        }

        tracing::info!(
            form_id = %form_id,
            deleted = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "bulk delete finished"
        );
        self.forget_deleted(form_id, &outcome.succeeded).await?;
        Ok(outcome)
    }

    async fn set_starred(&self, owner: &EntityId, form_id: &EntityId, response_id: &EntityId, starred: bool) -> Result<ResponseView, UseCaseError> {
        let id = response_id.clone();
        self.annotate(owner, form_id, response_id, move |a| a.set_starred(&id, starred)).await
    }

    async fn set_flagged(&self, owner: &EntityId, form_id: &EntityId, response_id: &EntityId, flagged: bool) -> Result<ResponseView, UseCaseError> {
        let id = response_id.clone();
        self.annotate(owner, form_id, response_id, move |a| a.set_flagged(&id, flagged)).await
    }

    async fn set_note(&self, owner: &EntityId, form_id: &EntityId, response_id: &EntityId, note: Option<String>) -> Result<ResponseView, UseCaseError> {
        let id = response_id.clone();
        self.annotate(owner, form_id, response_id, move |a| a.set_note(&id, note)).await
    }

    async fn bulk_star(&self, owner: &EntityId, form_id: &EntityId, response_ids: Vec<EntityId>, starred: bool) -> Result<BulkOutcome, UseCaseError> {
        self.bulk_mark(owner, form_id, response_ids, Mark::Star(starred)).await
    }

    async fn bulk_flag(&self, owner: &EntityId, form_id: &EntityId, response_ids: Vec<EntityId>, flagged: bool) -> Result<BulkOutcome, UseCaseError> {
        self.bulk_mark(owner, form_id, response_ids, Mark::Flag(flagged)).await
    }
}
