//! Notification templates
//!
//! Maps each notifiable event to a fixed title/message/kind payload.

use crate::domain::aggregates::NotificationKind;
use crate::domain::events::{DomainEvent, FormEvent, ResponseEvent};
use crate::domain::value_objects::EntityId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NotificationEvent {
    FormCreated { form_id: EntityId, title: String },
    FormPublished { form_id: EntityId, title: String },
    FormUpdated { form_id: EntityId, title: String },
    FormDeleted { title: String },
    FormDuplicated { form_id: EntityId, title: String },
    FormShared { form_id: EntityId, title: String },
    ResponseReceived { form_id: EntityId, title: String },
}

/// Payload persisted as a notification
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationTemplate {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub form_id: Option<EntityId>,
    pub link: Option<String>,
}

impl NotificationEvent {
    /// Recipient and event for a domain event
    pub fn from_domain(event: &DomainEvent) -> (EntityId, NotificationEvent) {
        let owner = event.owner_id().clone();
        let mapped = match event {
            DomainEvent::Form(e) => match e {
                FormEvent::Created { form_id, title, .. } => {
                    Self::FormCreated { form_id: form_id.clone(), title: title.clone() }
                }
                FormEvent::Updated { form_id, title, .. } => {
                    Self::FormUpdated { form_id: form_id.clone(), title: title.clone() }
                }
                FormEvent::Published { form_id, title, .. } => {
                    Self::FormPublished { form_id: form_id.clone(), title: title.clone() }
                }
                FormEvent::Duplicated { form_id, title, .. } => {
                    Self::FormDuplicated { form_id: form_id.clone(), title: title.clone() }
                }
                FormEvent::Shared { form_id, title, .. } => {
                    Self::FormShared { form_id: form_id.clone(), title: title.clone() }
                }
                FormEvent::Deleted { title, .. } => Self::FormDeleted { title: title.clone() },
            },
            DomainEvent::Response(ResponseEvent::Received { form_id, form_title, .. }) => {
                Self::ResponseReceived { form_id: form_id.clone(), title: form_title.clone() }
            }
        };
        (owner, mapped)
    }

    pub fn template(&self) -> NotificationTemplate {
        match self {
            Self::FormCreated { form_id, title } => NotificationTemplate {
                title: "Form Created".into(),
                message: format!("Your form \"{}\" has been created successfully.", title),
                kind: NotificationKind::Success,
                form_id: Some(form_id.clone()),
                link: Some(format!("/builder/{}", form_id)),
            },
            Self::FormPublished { form_id, title } => NotificationTemplate {
                title: "Form Published".into(),
                message: format!("\"{}\" is now live and accepting responses.", title),
                kind: NotificationKind::Success,
                form_id: Some(form_id.clone()),
                link: Some(format!("/form/{}", form_id)),
            },
            Self::FormUpdated { form_id, title } => NotificationTemplate {
                title: "Form Updated".into(),
                message: format!("Changes to \"{}\" have been saved.", title),
                kind: NotificationKind::Info,
                form_id: Some(form_id.clone()),
                link: Some(format!("/builder/{}", form_id)),
            },
            Self::FormDeleted { title } => NotificationTemplate {
                title: "Form Deleted".into(),
                message: format!("\"{}\" and its responses have been deleted.", title),
                kind: NotificationKind::Warning,
                form_id: None,
                link: None,
            },
            Self::FormDuplicated { form_id, title } => NotificationTemplate {
                title: "Form Duplicated".into(),
                message: format!("A copy named \"{}\" has been created.", title),
                kind: NotificationKind::Info,
                form_id: Some(form_id.clone()),
                link: Some(format!("/builder/{}", form_id)),
            },
            Self::FormShared { form_id, title } => NotificationTemplate {
                title: "Form Shared".into(),
                message: format!("The share link for \"{}\" is ready.", title),
                kind: NotificationKind::Info,
                form_id: Some(form_id.clone()),
                link: Some(format!("/form/{}", form_id)),
            },
            Self::ResponseReceived { form_id, title } => NotificationTemplate {
                title: "New Response".into(),
                message: format!("\"{}\" received a new response.", title),
                kind: NotificationKind::Success,
                form_id: Some(form_id.clone()),
                link: Some(format!("/form-responses/{}", form_id)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::Form;

    #[test]
    fn test_response_template_links_to_responses() {
        let form_id = EntityId::from_string("f1");
        let template = NotificationEvent::ResponseReceived {
            form_id: form_id.clone(),
            title: "Survey".into(),
        }
        .template();

        assert_eq!(template.title, "New Response");
        assert_eq!(template.message, "\"Survey\" received a new response.");
        assert_eq!(template.kind, NotificationKind::Success);
        assert_eq!(template.form_id, Some(form_id));
        assert_eq!(template.link.as_deref(), Some("/form-responses/f1"));
    }

    #[test]
    fn test_deleted_template_has_no_link() {
        let template = NotificationEvent::FormDeleted { title: "Old".into() }.template();
        assert_eq!(template.kind, NotificationKind::Warning);
        assert!(template.link.is_none());
        assert!(template.form_id.is_none());
    }

    #[test]
    fn test_from_domain_routes_to_owner() {
        let owner = EntityId::new();
        let mut form = Form::create(owner.clone(), "Poll", "");
        form.publish().unwrap();

        let mapped: Vec<_> = form.take_events().iter().map(NotificationEvent::from_domain).collect();

        assert_eq!(mapped.len(), 2);
        assert!(mapped.iter().all(|(recipient, _)| recipient == &owner));
        assert!(matches!(mapped[0].1, NotificationEvent::FormCreated { .. }));
        assert!(matches!(mapped[1].1, NotificationEvent::FormPublished { .. }));
    }
}
