//! Profile endpoints

use axum::{Json, extract::State};
use std::sync::Arc;

use formdesk_core::{ProfilePatch, UserProfile};

use crate::error::ApiResult;
use crate::middleware::CurrentUser;
use crate::{AppState, models::*};

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
) -> ApiResult<UserProfile> {
    let profile = state.profiles.get_profile(&owner).await?;
    Ok(Json(ApiResponse::success(profile)))
}

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
    Json(patch): Json<ProfilePatch>,
) -> ApiResult<UserProfile> {
    let profile = state.profiles.update_profile(&owner, patch).await?;
    Ok(Json(ApiResponse::success(profile)))
}
