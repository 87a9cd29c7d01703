//! Authentication extractor
//!
//! The fronting auth proxy verifies the session and forwards the user id in
//! `x-user-id`. Handlers that take [`CurrentUser`] reject requests without it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use formdesk_core::{EntityId, UseCaseError};

use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated owner of the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub EntityId);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| CurrentUser(EntityId::from_string(id)))
            .ok_or(ApiError::UseCase(UseCaseError::Unauthorized))
    }
}
