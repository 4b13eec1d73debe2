use axum::{Router, routing::get};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::presentation::AppState;
use crate::presentation::http::handlers::system::{admin_page, health, index};
use crate::presentation::http::openapi::ApiDoc;

pub(crate) mod posts;

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/admin", get(admin_page))
        .merge(posts::router(state.clone()))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
