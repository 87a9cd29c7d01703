//! Template catalog endpoints

use axum::{Router, Json, extract::Path};
use axum::routing::get;
use std::sync::Arc;

use formdesk_core::domain::services::FormTemplate;
use formdesk_core::UseCaseError;

use crate::error::ApiResult;
use crate::{AppState, models::*};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_templates))
        .route("/:id", get(get_template))
}

pub async fn list_templates() -> ApiResult<&'static [FormTemplate]> {
    Ok(Json(ApiResponse::success(FormTemplate::catalog())))
}

pub async fn get_template(Path(id): Path<String>) -> ApiResult<&'static FormTemplate> {
    let template = FormTemplate::find(&id)
        .ok_or_else(|| UseCaseError::NotFound(format!("Template {} not found", id)))?;
    Ok(Json(ApiResponse::success(template)))
}
