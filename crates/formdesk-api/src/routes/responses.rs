//! Response table endpoints
//!
//! Mounted under `/api/forms/:id/responses` by the forms router.

use axum::{Router, Json, extract::{Path, Query, State}};
use axum::routing::{get, post, put};
use std::sync::Arc;

use formdesk_core::application::dto::{BulkOutcome, ResponseView};
use formdesk_core::domain::services::{Page, ResponseQuery};
use formdesk_core::EntityId;

use crate::error::{ApiError, ApiResult};
use crate::middleware::CurrentUser;
use crate::{AppState, models::*};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/:id/responses", get(list_responses))
        .route("/:id/responses/bulk", post(bulk_action))
        .route("/:id/responses/:response_id", get(get_response).delete(delete_response))
        .route("/:id/responses/:response_id/star", put(set_starred))
        .route("/:id/responses/:response_id/flag", put(set_flagged))
        .route("/:id/responses/:response_id/note", put(set_note))
}

/// Build the table query; unset values fall back to the defaults
pub fn build_query(params: ResponseListParams, page_size: usize) -> Result<ResponseQuery, ApiError> {
    let mut query = ResponseQuery {
        per_page: page_size,
        ..ResponseQuery::default()
    };

    query.search = params.search.filter(|s| !s.trim().is_empty());
    if let Some(status) = params.status {
        query.status = status.parse().map_err(ApiError::BadRequest)?;
    }
    if let Some(device) = params.device.filter(|d| !d.eq_ignore_ascii_case("all")) {
        query.device = Some(device.parse().map_err(ApiError::BadRequest)?);
    }
    if let Some(sort) = params.sort {
        query.sort = sort.parse().map_err(ApiError::BadRequest)?;
    }
    if let Some(direction) = params.direction {
        query.direction = direction.parse().map_err(ApiError::BadRequest)?;
    }
    if let Some(page) = params.page {
        query.page = page.max(1);
    }
    if let Some(per_page) = params.per_page {
        query.per_page = per_page.max(1);
    }
    Ok(query)
}

/// Search, filter, sort and paginate a form's responses
pub async fn list_responses(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<EntityId>,
    Query(params): Query<ResponseListParams>,
) -> ApiResult<Page<ResponseView>> {
    let query = build_query(params, state.page_size)?;
    let page = state.responses.list_responses(&owner, &id, query).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn get_response(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
    Path((id, response_id)): Path<(EntityId, EntityId)>,
) -> ApiResult<ResponseView> {
    let view = state.responses.get_response(&owner, &id, &response_id).await?;
    Ok(Json(ApiResponse::success(view)))
}

pub async fn delete_response(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
    Path((id, response_id)): Path<(EntityId, EntityId)>,
) -> ApiResult<()> {
    state.responses.delete_response(&owner, &id, &response_id).await?;
    Ok(Json(ApiResponse::success(())))
}

pub async fn set_starred(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
    Path((id, response_id)): Path<(EntityId, EntityId)>,
    Json(input): Json<ToggleRequest>,
) -> ApiResult<ResponseView> {
    let view = state.responses.set_starred(&owner, &id, &response_id, input.value).await?;
    Ok(Json(ApiResponse::success(view)))
}

pub async fn set_flagged(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
    Path((id, response_id)): Path<(EntityId, EntityId)>,
    Json(input): Json<ToggleRequest>,
) -> ApiResult<ResponseView> {
    let view = state.responses.set_flagged(&owner, &id, &response_id, input.value).await?;
    Ok(Json(ApiResponse::success(view)))
}

pub async fn set_note(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
    Path((id, response_id)): Path<(EntityId, EntityId)>,
    Json(input): Json<NoteRequest>,
) -> ApiResult<ResponseView> {
    let view = state.responses.set_note(&owner, &id, &response_id, input.note).await?;
    Ok(Json(ApiResponse::success(view)))
}

/// Apply one action to every selected response; partial failures are reported, not rolled back
pub async fn bulk_action(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<EntityId>,
    Json(input): Json<BulkRequest>,
) -> ApiResult<BulkOutcome> {
    let responses = &state.responses;
    let outcome = match input.action {
        BulkAction::Delete => responses.bulk_delete(&owner, &id, input.ids).await?,
        BulkAction::Star => responses.bulk_star(&owner, &id, input.ids, true).await?,
        BulkAction::Unstar => responses.bulk_star(&owner, &id, input.ids, false).await?,
        BulkAction::Flag => responses.bulk_flag(&owner, &id, input.ids, true).await?,
        BulkAction::Unflag => responses.bulk_flag(&owner, &id, input.ids, false).await?,
    };
    Ok(Json(ApiResponse::success(outcome)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdesk_core::domain::services::{SortDirection, SortKey, StatusFilter};
    use formdesk_core::DeviceType;

    #[test]
    fn test_build_query_defaults() {
        let query = build_query(ResponseListParams::default(), 25).unwrap();
        assert_eq!(query.per_page, 25);
        assert_eq!(query.page, 1);
        assert_eq!(query.status, StatusFilter::All);
        assert_eq!(query.sort, SortKey::SubmittedAt);
        assert_eq!(query.direction, SortDirection::Desc);
    }

    #[test]
    fn test_build_query_parses_controls() {
        let params = ResponseListParams {
            search: Some("ada".into()),
            status: Some("starred".into()),
            device: Some("mobile".into()),
            sort: Some("id".into()),
            direction: Some("asc".into()),
            page: Some(0),
            per_page: Some(5),
        };
        let query = build_query(params, 10).unwrap();
        assert_eq!(query.search.as_deref(), Some("ada"));
        assert_eq!(query.status, StatusFilter::Starred);
        assert_eq!(query.device, Some(DeviceType::Mobile));
        assert_eq!(query.sort, SortKey::Id);
        assert_eq!(query.direction, SortDirection::Asc);
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, 5);
    }

    #[test]
    fn test_build_query_rejects_unknown_status() {
        let params = ResponseListParams { status: Some("pinned".into()), ..ResponseListParams::default() };
        assert!(matches!(build_query(params, 10), Err(ApiError::BadRequest(_))));
    }
}
