//! Notification inbox endpoints

use axum::{Router, Json, extract::{Path, Query, State}};
use axum::routing::{delete, get, post};
use std::sync::Arc;

use formdesk_core::{EntityId, Notification};

use crate::error::ApiResult;
use crate::middleware::CurrentUser;
use crate::{AppState, models::*};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/unread-count", get(unread_count))
        .route("/read-all", post(mark_all_read))
        .route("/:id/read", post(mark_read))
        .route("/:id", delete(delete_notification))
}

/// Newest first; `?unread=true` hides read entries
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
    Query(params): Query<NotificationParams>,
) -> ApiResult<Vec<Notification>> {
    let items = state.notifications.list_notifications(&owner, params.unread).await?;
    Ok(Json(ApiResponse::success(items)))
}

pub async fn unread_count(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
) -> ApiResult<CountResponse> {
    let count = state.notifications.unread_count(&owner).await?;
    Ok(Json(ApiResponse::success(CountResponse { count })))
}

pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<EntityId>,
) -> ApiResult<Notification> {
    let notification = state.notifications.mark_read(&owner, &id).await?;
    Ok(Json(ApiResponse::success(notification)))
}

pub async fn mark_all_read(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
) -> ApiResult<CountResponse> {
    let count = state.notifications.mark_all_read(&owner).await?;
    Ok(Json(ApiResponse::success(CountResponse { count })))
}

pub async fn delete_notification(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<EntityId>,
) -> ApiResult<()> {
    state.notifications.delete_notification(&owner, &id).await?;
    Ok(Json(ApiResponse::success(())))
}
