//! User profile mirrored from the auth provider

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::EntityId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    id: EntityId,
    display_name: String,
    email: Option<String>,
    phone: Option<String>,
    company: Option<String>,
    role: Option<String>,
    updated_at: DateTime<Utc>,
}

/// Partial profile update; `None` leaves the attribute untouched and an
/// empty string clears an optional attribute
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilePatch {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
}

impl UserProfile {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            display_name: String::new(),
            email: None,
            phone: None,
            company: None,
            role: None,
            updated_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn display_name(&self) -> &str { &self.display_name }
    pub fn email(&self) -> Option<&str> { self.email.as_deref() }
    pub fn phone(&self) -> Option<&str> { self.phone.as_deref() }
    pub fn company(&self) -> Option<&str> { self.company.as_deref() }
    pub fn role(&self) -> Option<&str> { self.role.as_deref() }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

    pub fn apply(&mut self, patch: ProfilePatch) {
        if let Some(name) = patch.display_name {
            self.display_name = name.trim().to_string();
        }
        merge_optional(&mut self.email, patch.email);
        merge_optional(&mut self.phone, patch.phone);
        merge_optional(&mut self.company, patch.company);
        merge_optional(&mut self.role, patch.role);
        self.updated_at = Utc::now();
    }
}

fn merge_optional(slot: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value {
        let value = value.trim();
        *slot = if value.is_empty() { None } else { Some(value.to_string()) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_patch() {
        let mut profile = UserProfile::new(EntityId::new());
        profile.apply(ProfilePatch {
            display_name: Some(" Grace ".into()),
            company: Some("Navy".into()),
            ..Default::default()
        });

        assert_eq!(profile.display_name(), "Grace");
        assert_eq!(profile.company(), Some("Navy"));
        assert_eq!(profile.email(), None);

        profile.apply(ProfilePatch { company: Some(String::new()), ..Default::default() });
        assert_eq!(profile.company(), None);
        assert_eq!(profile.display_name(), "Grace");
    }
}
