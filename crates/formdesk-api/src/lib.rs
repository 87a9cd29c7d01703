//! FormDesk HTTP API
//!
//! REST surface over the form builder use cases.
//!
//! # Layout
//!
//! ```text
//! /health                          liveness
//! /api/forms                       builder (owner, x-user-id)
//! /api/forms/:id/responses         response table, annotations, bulk actions
//! /api/forms/:id/analytics         per-form analytics
//! /api/public/forms/:id            viewer and submissions (anonymous)
//! /api/templates                   starter catalog
//! /api/notifications               inbox
//! /api/dashboard                   owner totals
//! /api/profile                     profile settings
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use formdesk_core::infrastructure::{
    InMemoryAnnotationStore, InMemoryFormRepository, InMemoryNotificationRepository,
    InMemoryResponseRepository, InMemoryUserRepository, JsonFileAnnotationStore, NotifyingEventPublisher,
};
use formdesk_core::{
    AnnotationStore, FormService, FormUseCases, InsightService, InsightUseCases, NotificationService,
    NotificationUseCases, ProfileService, ProfileUseCases, ResponseService, ResponseUseCases,
    SubmissionService, SubmissionUseCases,
};

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use models::*;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub forms: Arc<dyn FormUseCases>,
    pub submissions: Arc<dyn SubmissionUseCases>,
    pub responses: Arc<dyn ResponseUseCases>,
    pub notifications: Arc<dyn NotificationUseCases>,
    pub insights: Arc<dyn InsightUseCases>,
    pub profiles: Arc<dyn ProfileUseCases>,
    /// Response table page size when the client does not ask for one
    pub page_size: usize,
}

impl AppState {
    /// Wire every service against in-memory repositories
    pub fn in_memory(config: &ServerConfig) -> Self {
        let forms = Arc::new(InMemoryFormRepository::new());
        let responses = Arc::new(InMemoryResponseRepository::new());
        let notifications = Arc::new(InMemoryNotificationRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let publisher = Arc::new(NotifyingEventPublisher::new(notifications.clone()));

        let annotations: Arc<dyn AnnotationStore> = match &config.annotations_dir {
            Some(dir) => Arc::new(JsonFileAnnotationStore::new(dir.clone())),
            None => Arc::new(InMemoryAnnotationStore::new()),
        };

        Self {
            forms: Arc::new(FormService::new(
                forms.clone(),
                responses.clone(),
                annotations.clone(),
                publisher.clone(),
            )),
            submissions: Arc::new(SubmissionService::new(forms.clone(), responses.clone(), publisher)),
            responses: Arc::new(ResponseService::new(forms.clone(), responses.clone(), annotations)),
            notifications: Arc::new(NotificationService::new(notifications)),
            insights: Arc::new(InsightService::new(forms, responses)),
            profiles: Arc::new(ProfileService::new(users)),
            page_size: config.page_size,
        }
    }
}

/// Build the API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api", api_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Owner-scoped resources
        .nest("/forms", routes::forms::router())
        .nest("/notifications", routes::notifications::router())
        .route("/dashboard", get(routes::insights::dashboard))
        .route(
            "/profile",
            get(routes::profile::get_profile).patch(routes::profile::update_profile),
        )
        // Anonymous resources
        .nest("/public/forms", routes::public::router())
        .nest("/templates", routes::templates::router())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const OWNER: &str = "user-123";

    fn app() -> Router {
        build_router(AppState::in_memory(&ServerConfig::default()))
    }

    async fn call(app: &Router, method: Method, uri: &str, user: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::USER_AGENT, "Mozilla/5.0 (Windows NT 10.0; Win64; x64)");
        if let Some(user) = user {
            builder = builder.header(middleware::auth::USER_ID_HEADER, user);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = call(&app(), Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_owner_routes_require_user() {
        let (status, body) = call(&app(), Method::GET, "/api/forms", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "unauthorized");
    }

    #[tokio::test]
    async fn test_build_publish_submit_and_list() {
        let app = app();

        let (status, body) = call(&app, Method::POST, "/api/forms", Some(OWNER), Some(json!({ "title": "Signup" }))).await;
        assert_eq!(status, StatusCode::OK);
        let form_id = body["data"]["id"].as_str().unwrap().to_string();

        let fields = json!([
            { "id": "name", "type": "text", "label": "Name", "required": true },
            { "id": "email", "type": "email", "label": "Email", "required": false }
        ]);
        let (status, _) = call(&app, Method::PUT, &format!("/api/forms/{}/fields", form_id), Some(OWNER), Some(fields)).await;
        assert_eq!(status, StatusCode::OK);

        // Drafts are hidden from the public.
        let (status, _) = call(&app, Method::GET, &format!("/api/public/forms/{}", form_id), None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(&app, Method::POST, &format!("/api/forms/{}/publish", form_id), Some(OWNER), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call(&app, Method::GET, &format!("/api/public/forms/{}", form_id), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["fields"].as_array().unwrap().len(), 2);

        let submit = format!("/api/public/forms/{}/responses", form_id);
        let (status, body) = call(&app, Method::POST, &submit, None, Some(json!({ "answers": { "email": "nope" } }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["fields"]["name"], "Name is required");
        assert_eq!(body["error"]["fields"]["email"], "Please enter a valid email address");

        let answers = json!({ "answers": { "name": "Ada", "email": "ada@example.com" } });
        let (status, _) = call(&app, Method::POST, &submit, None, Some(answers)).await;
        assert_eq!(status, StatusCode::OK);

        let list = format!("/api/forms/{}/responses?device=desktop", form_id);
        let (status, body) = call(&app, Method::GET, &list, Some(OWNER), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["items"][0]["device"], "Desktop");

        let (_, body) = call(&app, Method::GET, "/api/notifications/unread-count", Some(OWNER), None).await;
        assert!(body["data"]["count"].as_u64().unwrap() >= 3);

        let (status, _) = call(&app, Method::GET, &format!("/api/forms/{}", form_id), Some("intruder"), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_bulk_star_reports_unknown_ids() {
        let app = app();
        let (_, body) = call(&app, Method::POST, "/api/forms", Some(OWNER), Some(json!({ "template_id": "contact" }))).await;
        let form_id = body["data"]["id"].as_str().unwrap().to_string();

        let bulk = json!({ "action": "star", "ids": ["missing"] });
        let (status, body) = call(&app, Method::POST, &format!("/api/forms/{}/responses/bulk", form_id), Some(OWNER), Some(bulk)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["failed"][0]["id"], "missing");
    }

    #[tokio::test]
    async fn test_bad_query_is_rejected() {
        let app = app();
        let (_, body) = call(&app, Method::POST, "/api/forms", Some(OWNER), Some(json!({}))).await;
        let form_id = body["data"]["id"].as_str().unwrap().to_string();

        let uri = format!("/api/forms/{}/responses?status=pinned", form_id);
        let (status, _) = call(&app, Method::GET, &uri, Some(OWNER), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_field_list_with_repeated_ids_is_rejected() {
        let app = app();
        let (_, body) = call(&app, Method::POST, "/api/forms", Some(OWNER), Some(json!({ "title": "Poll" }))).await;
        let form_id = body["data"]["id"].as_str().unwrap().to_string();
        let uri = format!("/api/forms/{}/fields", form_id);

        let clash = json!([
            { "id": "a", "type": "text", "label": "A", "options": ["junk"] },
            { "id": "a", "type": "radio", "label": "B", "options": [] }
        ]);
        let (status, body) = call(&app, Method::PUT, &uri, Some(OWNER), Some(clash)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "validation_failed");

        let fields = json!([
            { "id": "a", "type": "text", "label": "A", "options": ["junk"] },
            { "id": "b", "type": "radio", "label": "B", "options": [] }
        ]);
        let (status, body) = call(&app, Method::PUT, &uri, Some(OWNER), Some(fields)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"]["fields"][0].get("options").is_none());
        assert_eq!(body["data"]["fields"][1]["options"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_analytics_window_is_capped() {
        let app = app();
        let (_, body) = call(&app, Method::POST, "/api/forms", Some(OWNER), Some(json!({ "title": "Poll" }))).await;
        let form_id = body["data"]["id"].as_str().unwrap().to_string();

        let uri = format!("/api/forms/{}/analytics?days=4000000000", form_id);
        let (status, body) = call(&app, Method::GET, &uri, Some(OWNER), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["daily"].as_array().unwrap().len(), 365);
    }

    #[tokio::test]
    async fn test_templates_and_profile() {
        let app = app();
        let (status, body) = call(&app, Method::GET, "/api/templates", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 4);

        let (status, _) = call(&app, Method::GET, "/api/templates/nope", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let patch = json!({ "display_name": "Ada" });
        let (status, body) = call(&app, Method::PATCH, "/api/profile", Some(OWNER), Some(patch)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["display_name"], "Ada");
    }
}
