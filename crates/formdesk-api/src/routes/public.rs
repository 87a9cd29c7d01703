//! Public viewer endpoints (no authentication)

use axum::{Router, Json, extract::{Path, State}};
use axum::http::{header, HeaderMap};
use axum::routing::{get, post};
use std::sync::Arc;

use formdesk_core::application::dto::{PublicFormView, SubmitResponseCommand};
use formdesk_core::{EntityId, FormResponse};

use crate::error::ApiResult;
use crate::{AppState, models::*};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/:id", get(view_form))
        .route("/:id/responses", post(submit_response))
}

/// Render a published form and count the view
pub async fn view_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntityId>,
) -> ApiResult<PublicFormView> {
    let view = state.submissions.view_form(&id).await?;
    Ok(Json(ApiResponse::success(view)))
}

/// Validate and store one submission
pub async fn submit_response(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntityId>,
    headers: HeaderMap,
    Json(input): Json<SubmissionRequest>,
) -> ApiResult<FormResponse> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let command = SubmitResponseCommand { form_id: id, answers: input.answers, user_agent };
    let response = state.submissions.submit(command).await?;
    Ok(Json(ApiResponse::success(response)))
}
