//! Dashboard endpoint

use axum::{Json, extract::State};
use std::sync::Arc;

use formdesk_core::domain::services::Dashboard;

use crate::error::ApiResult;
use crate::middleware::CurrentUser;
use crate::{AppState, models::*};

/// Owner totals and the latest responses across all forms
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
) -> ApiResult<Dashboard> {
    let dashboard = state.insights.dashboard(&owner).await?;
    Ok(Json(ApiResponse::success(dashboard)))
}
