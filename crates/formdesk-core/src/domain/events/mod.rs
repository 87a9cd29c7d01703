//! Domain Events
//!
//! Events raised by aggregates to communicate state changes.

use chrono::{DateTime, Utc};
use crate::domain::value_objects::EntityId;

/// All domain events in the forms bounded context
#[derive(Clone, Debug, PartialEq)]
pub enum DomainEvent {
    Form(FormEvent),
    Response(ResponseEvent),
}

/// Form-related domain events
#[derive(Clone, Debug, PartialEq)]
pub enum FormEvent {
    Created {
        form_id: EntityId,
        owner_id: EntityId,
        title: String,
        created_at: DateTime<Utc>,
    },

    Updated {
        form_id: EntityId,
        owner_id: EntityId,
        title: String,
        updated_at: DateTime<Utc>,
    },

    Published {
        form_id: EntityId,
        owner_id: EntityId,
        title: String,
        published_at: DateTime<Utc>,
    },

    Duplicated {
        form_id: EntityId,
        source_form_id: EntityId,
        owner_id: EntityId,
        title: String,
    },

    Shared {
        form_id: EntityId,
        owner_id: EntityId,
        title: String,
        share_path: String,
    },

    Deleted {
        form_id: EntityId,
        owner_id: EntityId,
        title: String,
        deleted_at: DateTime<Utc>,
    },
}

/// Response-related domain events
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseEvent {
    Received {
        response_id: EntityId,
        form_id: EntityId,
        owner_id: EntityId,
        form_title: String,
        received_at: DateTime<Utc>,
    },
}

impl DomainEvent {
    /// Get the aggregate ID this event belongs to
    pub fn aggregate_id(&self) -> &EntityId {
        match self {
            DomainEvent::Form(e) => match e {
                FormEvent::Created { form_id, .. } => form_id,
                FormEvent::Updated { form_id, .. } => form_id,
                FormEvent::Published { form_id, .. } => form_id,
                FormEvent::Duplicated { form_id, .. } => form_id,
                FormEvent::Shared { form_id, .. } => form_id,
                FormEvent::Deleted { form_id, .. } => form_id,
            },
            DomainEvent::Response(e) => match e {
                ResponseEvent::Received { response_id, .. } => response_id,
            },
        }
    }

    /// Owner of the form the event concerns
    pub fn owner_id(&self) -> &EntityId {
        match self {
            DomainEvent::Form(e) => match e {
                FormEvent::Created { owner_id, .. }
                | FormEvent::Updated { owner_id, .. }
                | FormEvent::Published { owner_id, .. }
                | FormEvent::Duplicated { owner_id, .. }
                | FormEvent::Shared { owner_id, .. }
                | FormEvent::Deleted { owner_id, .. } => owner_id,
            },
            DomainEvent::Response(ResponseEvent::Received { owner_id, .. }) => owner_id,
        }
    }

    /// Get event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::Form(e) => match e {
                FormEvent::Created { .. } => "form.created",
                FormEvent::Updated { .. } => "form.updated",
                FormEvent::Published { .. } => "form.published",
                FormEvent::Duplicated { .. } => "form.duplicated",
                FormEvent::Shared { .. } => "form.shared",
                FormEvent::Deleted { .. } => "form.deleted",
            },
            DomainEvent::Response(e) => match e {
                ResponseEvent::Received { .. } => "response.received",
            },
        }
    }
}
