//! Notification inbox

use std::sync::Arc;
use async_trait::async_trait;

use crate::domain::aggregates::Notification;
use crate::domain::value_objects::EntityId;
use crate::ports::inbound::{NotificationUseCases, UseCaseError};
use crate::ports::outbound::NotificationRepository;

pub struct NotificationService {
    notifications: Arc<dyn NotificationRepository>,
}

impl NotificationService {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    async fn load_owned(&self, owner: &EntityId, id: &EntityId) -> Result<Notification, UseCaseError> {
        let notification = self
            .notifications
            .find_by_id(id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound(format!("Notification {} not found", id)))?;

        if notification.owner_id() != owner {
            return Err(UseCaseError::Forbidden(format!("Notification {} belongs to another user", id)));
        }
        Ok(notification)
    }
}

#[async_trait]
impl NotificationUseCases for NotificationService {
    async fn list_notifications(&self, owner: &EntityId, unread_only: bool) -> Result<Vec<Notification>, UseCaseError> {
        let mut items: Vec<Notification> = self
            .notifications
            .find_by_owner(owner)
            .await?
            .into_iter()
            .filter(|n| !unread_only || !n.is_read())
            .collect();
        items.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(items)
    }

    async fn unread_count(&self, owner: &EntityId) -> Result<usize, UseCaseError> {
        let items = self.notifications.find_by_owner(owner).await?;
        Ok(items.iter().filter(|n| !n.is_read()).count())
    }

    async fn mark_read(&self, owner: &EntityId, notification_id: &EntityId) -> Result<Notification, UseCaseError> {
        let mut notification = self.load_owned(owner, notification_id).await?;
        if notification.mark_read() {
            self.notifications.save(&notification).await?;
        }
        Ok(notification)
    }

    async fn mark_all_read(&self, owner: &EntityId) -> Result<usize, UseCaseError> {
        let mut changed = 0;
        for mut notification in self.notifications.find_by_owner(owner).await? {
            if notification.mark_read() {
                self.notifications.save(&notification).await?;
                changed += 1;
            }
        }
        tracing::debug!(owner = %owner, changed, "notifications marked read");
        Ok(changed)
    }

    async fn delete_notification(&self, owner: &EntityId, notification_id: &EntityId) -> Result<(), UseCaseError> {
        self.load_owned(owner, notification_id).await?;
        self.notifications.delete(notification_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::NotificationEvent;
    use crate::infrastructure::persistence::InMemoryNotificationRepository;

    async fn seeded(owner: &EntityId, count: usize) -> (Arc<InMemoryNotificationRepository>, Vec<EntityId>) {
        let repo = Arc::new(InMemoryNotificationRepository::new());
        let mut ids = Vec::new();
        for _ in 0..count {
            let template = NotificationEvent::FormCreated {
                form_id: EntityId::new(),
                title: "Survey".into(),
            }
            .template();
            let notification = Notification::from_template(owner.clone(), template);
            repo.save(&notification).await.unwrap();
            ids.push(notification.id().clone());
        }
        (repo, ids)
    }

    #[tokio::test]
    async fn test_mark_read_and_count() {
        let owner = EntityId::new();
        let (repo, ids) = seeded(&owner, 3).await;
        let svc = NotificationService::new(repo);

        assert_eq!(svc.unread_count(&owner).await.unwrap(), 3);
        svc.mark_read(&owner, &ids[0]).await.unwrap();
        assert_eq!(svc.unread_count(&owner).await.unwrap(), 2);
        assert_eq!(svc.list_notifications(&owner, true).await.unwrap().len(), 2);
        assert_eq!(svc.list_notifications(&owner, false).await.unwrap().len(), 3);

        assert_eq!(svc.mark_all_read(&owner).await.unwrap(), 2);
        assert_eq!(svc.unread_count(&owner).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_foreign_notification_is_forbidden() {
        let owner = EntityId::new();
        let (repo, ids) = seeded(&owner, 1).await;
        let svc = NotificationService::new(repo);

        let result = svc.delete_notification(&EntityId::new(), &ids[0]).await;
        assert!(matches!(result, Err(UseCaseError::Forbidden(_))));

        svc.delete_notification(&owner, &ids[0]).await.unwrap();
        assert!(svc.list_notifications(&owner, false).await.unwrap().is_empty());
    }
}
