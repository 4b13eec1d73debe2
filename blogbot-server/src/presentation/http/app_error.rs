use crate::domain::error::DomainError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

const BASIC_CHALLENGE: &str = "Basic realm=\"blog-admin\"";

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    JsonBody(#[from] JsonRejection),

    #[error(transparent)]
    PathParam(#[from] PathRejection),

    #[error("unauthorized")]
    Unauthorized,

    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AppError::Domain(err) => match &err {
                DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
                DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "post not found".to_string()),
                DomainError::Storage(_) | DomainError::Integrity(_) => {
                    error!(error = %err, "request failed on storage");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal error".to_string(),
                    )
                }
            },
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::JsonBody(rejection) => (rejection.status(), rejection.body_text()),
            AppError::PathParam(rejection) => (rejection.status(), rejection.body_text()),
            AppError::Unauthorized => return unauthorized(),
            AppError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        (status, Json(ErrorBody { detail: msg })).into_response()
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, BASIC_CHALLENGE)],
        Json(ErrorBody {
            detail: "invalid credentials".to_string(),
        }),
    )
        .into_response()
}
