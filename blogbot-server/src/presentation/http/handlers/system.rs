use axum::{Json, extract::State, response::Html};
use serde::Serialize;
use utoipa::ToSchema;

use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppError, AppResult};

const ADMIN_PAGE: &str = include_str!("../admin.html");

#[derive(Debug, Serialize)]
pub(crate) struct IndexResponse {
    message: &'static str,
    version: &'static str,
    admin_panel: &'static str,
    docs: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct HealthResponse {
    pub(crate) status: String,
    pub(crate) message: String,
}

pub(crate) async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Blog Admin API",
        version: env!("CARGO_PKG_VERSION"),
        admin_panel: "/admin",
        docs: "/docs",
    })
}

pub(crate) async fn admin_page() -> Html<&'static str> {
    Html(ADMIN_PAGE)
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "API and database are reachable", body = HealthResponse),
        (status = 503, description = "Database is unreachable")
    )
)]
pub(crate) async fn health(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    if !state.blog_service.is_healthy().await {
        return Err(AppError::ServiceUnavailable(
            "database connection failed".to_string(),
        ));
    }

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        message: "API and database are operational".to_string(),
    }))
}
