//! In-memory repository implementations
//!
//! Back the development server and the test suite.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::aggregates::{Form, FormResponse, Notification, UserProfile};
use crate::domain::value_objects::EntityId;
use crate::ports::outbound::{
    FormRepository, NotificationRepository, RepositoryError, ResponseRepository, UserRepository,
};

/// In-memory form repository
#[derive(Default)]
pub struct InMemoryFormRepository {
    forms: DashMap<EntityId, Form>,
}

impl InMemoryFormRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FormRepository for InMemoryFormRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Form>, RepositoryError> {
        Ok(self.forms.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_by_owner(&self, owner_id: &EntityId) -> Result<Vec<Form>, RepositoryError> {
        Ok(self
            .forms
            .iter()
            .filter(|entry| entry.owner_id() == owner_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn save(&self, form: &Form) -> Result<(), RepositoryError> {
        match self.forms.entry(form.id().clone()) {
            Entry::Occupied(mut entry) => {
                let mut updated = form.clone();
                updated.carry_counters(entry.get());
                entry.insert(updated);
            }
            Entry::Vacant(entry) => {
                entry.insert(form.clone());
            }
        }
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError> {
        self.forms.remove(id);
        Ok(())
    }

    async fn increment_views(&self, id: &EntityId) -> Result<(), RepositoryError> {
        let mut form = self.forms.get_mut(id).ok_or(RepositoryError::NotFound)?;
        form.record_view();
        Ok(())
    }

    async fn increment_responses(&self, id: &EntityId, delta: i64) -> Result<(), RepositoryError> {
        let mut form = self.forms.get_mut(id).ok_or(RepositoryError::NotFound)?;
        form.adjust_response_count(delta);
        Ok(())
    }
}

/// In-memory response repository
#[derive(Default)]
pub struct InMemoryResponseRepository {
    responses: DashMap<EntityId, FormResponse>,
}

impl InMemoryResponseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResponseRepository for InMemoryResponseRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<FormResponse>, RepositoryError> {
        Ok(self.responses.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_by_form(&self, form_id: &EntityId) -> Result<Vec<FormResponse>, RepositoryError> {
        Ok(self
            .responses
            .iter()
            .filter(|entry| entry.form_id() == form_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn save(&self, response: &FormResponse) -> Result<(), RepositoryError> {
        self.responses.insert(response.id().clone(), response.clone());
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError> {
        self.responses
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

/// In-memory notification repository
#[derive(Default)]
pub struct InMemoryNotificationRepository {
    notifications: DashMap<EntityId, Notification>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Notification>, RepositoryError> {
        Ok(self.notifications.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_by_owner(&self, owner_id: &EntityId) -> Result<Vec<Notification>, RepositoryError> {
        Ok(self
            .notifications
            .iter()
            .filter(|entry| entry.owner_id() == owner_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn save(&self, notification: &Notification) -> Result<(), RepositoryError> {
        self.notifications.insert(notification.id().clone(), notification.clone());
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError> {
        self.notifications.remove(id);
        Ok(())
    }
}

/// In-memory user profile repository
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<EntityId, UserProfile>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<UserProfile>, RepositoryError> {
        Ok(self.users.get(id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, profile: &UserProfile) -> Result<(), RepositoryError> {
        self.users.insert(profile.id().clone(), profile.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_form_repository_save_and_find() {
        let repo = InMemoryFormRepository::new();
        let owner = EntityId::new();
        let form = Form::create(owner.clone(), "Survey", "");

        repo.save(&form).await.unwrap();

        let found = repo.find_by_id(form.id()).await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().title(), "Survey");
        assert_eq!(repo.find_by_owner(&owner).await.unwrap().len(), 1);
        assert!(repo.find_by_owner(&EntityId::new()).await.unwrap().is_empty());

        repo.delete(form.id()).await.unwrap();
        assert!(repo.find_by_id(form.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_form_counters_survive_document_saves() {
        let repo = InMemoryFormRepository::new();
        let mut form = Form::create(EntityId::new(), "Survey", "");
        repo.save(&form).await.unwrap();

        repo.increment_views(form.id()).await.unwrap();
        repo.increment_responses(form.id(), 2).await.unwrap();

        // A copy loaded before the counts still carries zeros.
        form.update_details(Some("Renamed".into()), None);
        repo.save(&form).await.unwrap();

        let stored = repo.find_by_id(form.id()).await.unwrap().unwrap();
        assert_eq!(stored.title(), "Renamed");
        assert_eq!(stored.view_count(), 1);
        assert_eq!(stored.response_count(), 2);

        repo.increment_responses(form.id(), -5).await.unwrap();
        assert_eq!(repo.find_by_id(form.id()).await.unwrap().unwrap().response_count(), 0);
    }

    #[tokio::test]
    async fn test_counting_a_missing_form_does_not_create_it() {
        let repo = InMemoryFormRepository::new();
        let id = EntityId::new();

        assert!(matches!(repo.increment_views(&id).await, Err(RepositoryError::NotFound)));
        assert!(matches!(repo.increment_responses(&id, 1).await, Err(RepositoryError::NotFound)));
        assert!(repo.find_by_id(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_response_repository_by_form() {
        let repo = InMemoryResponseRepository::new();
        let form_id = EntityId::new();

        let first = FormResponse::create(form_id.clone(), BTreeMap::new(), "");
        let second = FormResponse::create(form_id.clone(), BTreeMap::new(), "");
        let stray = FormResponse::create(EntityId::new(), BTreeMap::new(), "");
        for response in [&first, &second, &stray] {
            repo.save(response).await.unwrap();
        }

        assert_eq!(repo.find_by_form(&form_id).await.unwrap().len(), 2);

        repo.delete(first.id()).await.unwrap();
        assert_eq!(repo.find_by_form(&form_id).await.unwrap().len(), 1);
        assert!(matches!(repo.delete(first.id()).await, Err(RepositoryError::NotFound)));
    }
}
