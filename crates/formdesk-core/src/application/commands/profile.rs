//! Profile settings

use std::sync::Arc;
use async_trait::async_trait;

use crate::domain::aggregates::{ProfilePatch, UserProfile};
use crate::domain::services::{is_valid_email, is_valid_phone, ValidationErrors};
use crate::domain::value_objects::EntityId;
use crate::ports::inbound::{ProfileUseCases, UseCaseError};
use crate::ports::outbound::UserRepository;

pub struct ProfileService {
    users: Arc<dyn UserRepository>,
}

impl ProfileService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    fn validate(patch: &ProfilePatch) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(email) = patch.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
            if !is_valid_email(email) {
                errors.add("email", "Please enter a valid email address");
            }
        }
        if let Some(phone) = patch.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            if !is_valid_phone(phone) {
                errors.add("phone", "Please enter a valid phone number");
            }
        }
        errors.into_result()
    }
}

#[async_trait]
impl ProfileUseCases for ProfileService {
    async fn get_profile(&self, owner: &EntityId) -> Result<UserProfile, UseCaseError> {
        if let Some(profile) = self.users.find_by_id(owner).await? {
            return Ok(profile);
        }

        let profile = UserProfile::new(owner.clone());
        self.users.save(&profile).await?;
        tracing::info!(user_id = %owner, "profile created");
        Ok(profile)
    }

    async fn update_profile(&self, owner: &EntityId, patch: ProfilePatch) -> Result<UserProfile, UseCaseError> {
        Self::validate(&patch)?;

        let mut profile = self.get_profile(owner).await?;
        profile.apply(patch);
        self.users.save(&profile).await?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::InMemoryUserRepository;

    fn service() -> ProfileService {
        ProfileService::new(Arc::new(InMemoryUserRepository::new()))
    }

    #[tokio::test]
    async fn test_profile_created_on_first_access() {
        let svc = service();
        let owner = EntityId::new();

        let profile = svc.get_profile(&owner).await.unwrap();
        assert_eq!(profile.id(), &owner);
        assert_eq!(profile.display_name(), "");
    }

    #[tokio::test]
    async fn test_update_profile() {
        let svc = service();
        let owner = EntityId::new();

        let patch = ProfilePatch {
            display_name: Some("Ada".into()),
            email: Some("ada@example.com".into()),
            ..ProfilePatch::default()
        };
        svc.update_profile(&owner, patch).await.unwrap();

        let profile = svc.get_profile(&owner).await.unwrap();
        assert_eq!(profile.display_name(), "Ada");
        assert_eq!(profile.email(), Some("ada@example.com"));
    }

    #[tokio::test]
    async fn test_invalid_email_rejected() {
        let svc = service();
        let patch = ProfilePatch { email: Some("nope".into()), ..ProfilePatch::default() };

        let Err(UseCaseError::Validation(errors)) = svc.update_profile(&EntityId::new(), patch).await else {
            panic!("expected validation error");
        };
        assert!(errors.get("email").is_some());
    }
}
