use axum::extract::FromRequest;
use axum::extract::FromRequestParts;

use crate::presentation::http::app_error::AppError;

/// `Json` whose rejections are rendered as `{"detail": ...}` bodies.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub(crate) struct AppJson<T>(pub(crate) T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub(crate) struct AppPath<T>(pub(crate) T);
