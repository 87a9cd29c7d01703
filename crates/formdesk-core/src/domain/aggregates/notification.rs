//! Notification Aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::services::notifications::NotificationTemplate;
use crate::domain::value_objects::EntityId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    id: EntityId,
    owner_id: EntityId,
    title: String,
    message: String,
    #[serde(rename = "type")]
    kind: NotificationKind,
    read: bool,
    form_id: Option<EntityId>,
    link: Option<String>,
    created_at: DateTime<Utc>,
}

impl Notification {
    /// Build an unread notification for `owner_id` from a template
    pub fn from_template(owner_id: EntityId, template: NotificationTemplate) -> Self {
        Self {
            id: EntityId::new(),
            owner_id,
            title: template.title,
            message: template.message,
            kind: template.kind,
            read: false,
            form_id: template.form_id,
            link: template.link,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn owner_id(&self) -> &EntityId { &self.owner_id }
    pub fn title(&self) -> &str { &self.title }
    pub fn message(&self) -> &str { &self.message }
    pub fn kind(&self) -> NotificationKind { self.kind }
    pub fn is_read(&self) -> bool { self.read }
    pub fn form_id(&self) -> Option<&EntityId> { self.form_id.as_ref() }
    pub fn link(&self) -> Option<&str> { self.link.as_deref() }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }

    /// Returns whether the flag changed
    pub fn mark_read(&mut self) -> bool {
        !std::mem::replace(&mut self.read, true)
    }

    pub fn mark_unread(&mut self) -> bool {
        std::mem::replace(&mut self.read, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_toggle() {
        let template = NotificationTemplate {
            title: "Hello".into(),
            message: "World".into(),
            kind: NotificationKind::Info,
            form_id: None,
            link: None,
        };
        let mut notification = Notification::from_template(EntityId::new(), template);

        assert!(!notification.is_read());
        assert!(notification.mark_read());
        assert!(!notification.mark_read());
        assert!(notification.is_read());
        assert!(notification.mark_unread());
        assert!(!notification.is_read());
    }
}
