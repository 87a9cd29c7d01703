//! Form builder endpoints

use axum::{Router, Json, extract::{Path, Query, State}};
use axum::routing::{get, post, put};
use std::sync::Arc;

use formdesk_core::application::dto::{CreateFormCommand, DeleteFormOutcome, ShareLink, UpdateFormCommand};
use formdesk_core::domain::services::FormAnalytics;
use formdesk_core::{EntityId, Field, Form, FormSettings};

use crate::error::ApiResult;
use crate::middleware::CurrentUser;
use crate::routes::responses;
use crate::{AppState, models::*};

/// Default trailing window for per-form analytics; longer requests are capped
const ANALYTICS_DAYS: u32 = 30;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_forms).post(create_form))
        .route("/:id", get(get_form).patch(update_form).delete(delete_form))
        .route("/:id/fields", put(save_fields))
        .route("/:id/settings", put(update_settings))
        .route("/:id/publish", post(publish_form))
        .route("/:id/unpublish", post(unpublish_form))
        .route("/:id/duplicate", post(duplicate_form))
        .route("/:id/share", post(share_form))
        .route("/:id/analytics", get(form_analytics))
        .merge(responses::router())
}

/// List the caller's forms, most recently updated first
pub async fn list_forms(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
) -> ApiResult<Vec<Form>> {
    let forms = state.forms.list_forms(&owner).await?;
    Ok(Json(ApiResponse::success(forms)))
}

/// Create a blank form or one seeded from a template
pub async fn create_form(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
    Json(input): Json<FormCreate>,
) -> ApiResult<Form> {
    let form = match input.template_id {
        Some(template_id) => state.forms.create_from_template(&owner, &template_id).await?,
        None => {
            let command = CreateFormCommand { title: input.title, description: input.description };
            state.forms.create_form(&owner, command).await?
        }
    };
    Ok(Json(ApiResponse::success(form)))
}

pub async fn get_form(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<EntityId>,
) -> ApiResult<Form> {
    let form = state.forms.get_form(&owner, &id).await?;
    Ok(Json(ApiResponse::success(form)))
}

pub async fn update_form(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateFormCommand>,
) -> ApiResult<Form> {
    let form = state.forms.update_details(&owner, &id, input).await?;
    Ok(Json(ApiResponse::success(form)))
}

/// Replace the whole field list in one write
pub async fn save_fields(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<EntityId>,
    Json(fields): Json<Vec<Field>>,
) -> ApiResult<Form> {
    let form = state.forms.save_fields(&owner, &id, fields).await?;
    Ok(Json(ApiResponse::success(form)))
}

pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<EntityId>,
    Json(settings): Json<FormSettings>,
) -> ApiResult<Form> {
    let form = state.forms.update_settings(&owner, &id, settings).await?;
    Ok(Json(ApiResponse::success(form)))
}

pub async fn publish_form(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<EntityId>,
) -> ApiResult<Form> {
    let form = state.forms.publish_form(&owner, &id).await?;
    Ok(Json(ApiResponse::success(form)))
}

pub async fn unpublish_form(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<EntityId>,
) -> ApiResult<Form> {
    let form = state.forms.unpublish_form(&owner, &id).await?;
    Ok(Json(ApiResponse::success(form)))
}

pub async fn duplicate_form(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<EntityId>,
) -> ApiResult<Form> {
    let form = state.forms.duplicate_form(&owner, &id).await?;
    Ok(Json(ApiResponse::success(form)))
}

pub async fn share_form(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<EntityId>,
) -> ApiResult<ShareLink> {
    let link = state.forms.share_form(&owner, &id).await?;
    Ok(Json(ApiResponse::success(link)))
}

/// Delete a form together with its responses
pub async fn delete_form(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<EntityId>,
) -> ApiResult<DeleteFormOutcome> {
    let outcome = state.forms.delete_form(&owner, &id).await?;
    Ok(Json(ApiResponse::success(outcome)))
}

pub async fn form_analytics(
    State(state): State<Arc<AppState>>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<EntityId>,
    Query(params): Query<AnalyticsParams>,
) -> ApiResult<FormAnalytics> {
    let days = params.days.unwrap_or(ANALYTICS_DAYS);
    let analytics = state.insights.form_analytics(&owner, &id, days).await?;
    Ok(Json(ApiResponse::success(analytics)))
}
