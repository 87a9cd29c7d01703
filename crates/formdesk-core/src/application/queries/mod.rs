//! Query handlers
//!
//! Read-only projections over forms and responses.

use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;

use crate::application::commands::load_owned_form;
use crate::domain::services::{AnalyticsService, Dashboard, FormAnalytics};
use crate::domain::value_objects::EntityId;
use crate::ports::inbound::{InsightUseCases, UseCaseError};
use crate::ports::outbound::{FormRepository, ResponseRepository};

/// How many responses the dashboard lists
pub const RECENT_RESPONSES: usize = 5;

/// Analytics and dashboard queries
pub struct InsightService {
    forms: Arc<dyn FormRepository>,
    responses: Arc<dyn ResponseRepository>,
}

impl InsightService {
    pub fn new(forms: Arc<dyn FormRepository>, responses: Arc<dyn ResponseRepository>) -> Self {
        Self { forms, responses }
    }
}

#[async_trait]
impl InsightUseCases for InsightService {
    async fn form_analytics(&self, owner: &EntityId, form_id: &EntityId, window_days: u32) -> Result<FormAnalytics, UseCaseError> {
        let form = load_owned_form(self.forms.as_ref(), owner, form_id).await?;
        let responses = self.responses.find_by_form(form_id).await?;
        let today = Utc::now().date_naive();
        Ok(AnalyticsService::form_analytics(&form, &responses, today, window_days))
    }

    async fn dashboard(&self, owner: &EntityId) -> Result<Dashboard, UseCaseError> {
        let forms = self.forms.find_by_owner(owner).await?;

        let mut responses = Vec::new();
        for form in &forms {
            responses.extend(self.responses.find_by_form(form.id()).await?);
        }

        Ok(AnalyticsService::dashboard(&forms, &responses, RECENT_RESPONSES))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::{Form, FormResponse};
    use crate::domain::services::MAX_WINDOW_DAYS;
    use crate::infrastructure::persistence::{InMemoryFormRepository, InMemoryResponseRepository};
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_dashboard_counts_owner_forms_only() {
        let forms = Arc::new(InMemoryFormRepository::new());
        let responses = Arc::new(InMemoryResponseRepository::new());
        let svc = InsightService::new(forms.clone(), responses.clone());
        let owner = EntityId::new();

        let mut live = Form::create(owner.clone(), "Live", "");
        live.publish().unwrap();
        for _ in 0..7 {
            let response = FormResponse::create(live.id().clone(), BTreeMap::new(), "");
            live.record_response(response.id().clone()).unwrap();
            responses.save(&response).await.unwrap();
        }
        forms.save(&live).await.unwrap();
        forms.save(&Form::create(owner.clone(), "Draft", "")).await.unwrap();
        forms.save(&Form::create(EntityId::new(), "Foreign", "")).await.unwrap();

        let dashboard = svc.dashboard(&owner).await.unwrap();
        assert_eq!(dashboard.total_forms, 2);
        assert_eq!(dashboard.published_forms, 1);
        assert_eq!(dashboard.total_responses, 7);
        assert_eq!(dashboard.recent_responses.len(), RECENT_RESPONSES);
    }

    #[tokio::test]
    async fn test_form_analytics_window() {
        let forms = Arc::new(InMemoryFormRepository::new());
        let responses = Arc::new(InMemoryResponseRepository::new());
        let svc = InsightService::new(forms.clone(), responses.clone());
        let owner = EntityId::new();

        let form = Form::create(owner.clone(), "Poll", "");
        forms.save(&form).await.unwrap();
        responses
            .save(&FormResponse::create(form.id().clone(), BTreeMap::new(), "iPad"))
            .await
            .unwrap();

        let analytics = svc.form_analytics(&owner, form.id(), 7).await.unwrap();
        assert_eq!(analytics.daily.len(), 7);
        assert_eq!(analytics.responses, 1);
        assert_eq!(analytics.devices.tablet, 1);

        let foreign = svc.form_analytics(&EntityId::new(), form.id(), 7).await;
        assert!(matches!(foreign, Err(UseCaseError::Forbidden(_))));

        let widest = svc.form_analytics(&owner, form.id(), u32::MAX).await.unwrap();
        assert_eq!(widest.daily.len(), MAX_WINDOW_DAYS as usize);
    }
}
