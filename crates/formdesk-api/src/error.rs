//! HTTP error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use formdesk_core::UseCaseError;

use crate::models::ApiResponse;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    UseCase(#[from] UseCaseError),

    #[error("{0}")]
    BadRequest(String),
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::UseCase(e) => match e {
                UseCaseError::NotFound(_) => StatusCode::NOT_FOUND,
                UseCaseError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                UseCaseError::Unauthorized => StatusCode::UNAUTHORIZED,
                UseCaseError::Forbidden(_) => StatusCode::FORBIDDEN,
                UseCaseError::Domain(_) => StatusCode::CONFLICT,
                UseCaseError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::BadRequest(message) => ApiResponse::<()>::error("bad_request", message),
            Self::UseCase(UseCaseError::Validation(errors)) => ApiResponse::invalid(errors),
            Self::UseCase(UseCaseError::Repository(e)) => {
                // Storage details stay in the log.
                tracing::error!(error = %e, "repository failure");
                ApiResponse::error("internal", "Something went wrong, please try again")
            }
            Self::UseCase(e @ UseCaseError::NotFound(_)) => ApiResponse::error("not_found", &e.to_string()),
            Self::UseCase(e @ UseCaseError::Unauthorized) => ApiResponse::error("unauthorized", &e.to_string()),
            Self::UseCase(e @ UseCaseError::Forbidden(_)) => ApiResponse::error("forbidden", &e.to_string()),
            Self::UseCase(e @ UseCaseError::Domain(_)) => ApiResponse::error("conflict", &e.to_string()),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdesk_core::domain::services::ValidationErrors;
    use formdesk_core::{FormError, RepositoryError};

    #[test]
    fn test_status_mapping() {
        let cases = [
            (UseCaseError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (UseCaseError::Validation(ValidationErrors::single("email", "bad")), StatusCode::UNPROCESSABLE_ENTITY),
            (UseCaseError::Unauthorized, StatusCode::UNAUTHORIZED),
            (UseCaseError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (UseCaseError::Domain(FormError::NotPublished), StatusCode::CONFLICT),
            (UseCaseError::Repository(RepositoryError::NotFound), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status(), status);
        }
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
    }
}
