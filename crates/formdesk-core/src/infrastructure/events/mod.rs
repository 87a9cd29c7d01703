//! Event publishers

use std::sync::Arc;
use async_trait::async_trait;

use crate::domain::aggregates::Notification;
use crate::domain::services::NotificationEvent;
use crate::domain::DomainEvent;
use crate::ports::outbound::{EventPublisher, NotificationRepository, RepositoryError};

/// Turns every domain event into an inbox notification for the form owner
pub struct NotifyingEventPublisher {
    notifications: Arc<dyn NotificationRepository>,
}

impl NotifyingEventPublisher {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }
}

#[async_trait]
impl EventPublisher for NotifyingEventPublisher {
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), RepositoryError> {
        for event in &events {
            let (owner, mapped) = NotificationEvent::from_domain(event);
            let notification = Notification::from_template(owner, mapped.template());
            self.notifications.save(&notification).await?;
            tracing::debug!(event = event.event_type(), notification_id = %notification.id(), "notification created");
        }
        Ok(())
    }
}
