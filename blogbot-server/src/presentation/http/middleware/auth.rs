use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::warn;

use crate::presentation::AppState;
use crate::presentation::http::app_error::AppError;

/// Admin that passed basic-auth; inserted by [`basic_auth_middleware`].
#[derive(Debug, Clone)]
pub(crate) struct AdminUser {
    pub(crate) username: String,
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

pub(crate) async fn basic_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (username, password) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_basic_credentials)
        .ok_or(AppError::Unauthorized)?;

    if !state.credentials.verify(&username, &password) {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "rejected admin credentials"
        );
        return Err(AppError::Unauthorized);
    }

    request.extensions_mut().insert(AdminUser { username });

    Ok(next.run(request).await)
}

fn parse_basic_credentials(header_value: &str) -> Option<(String, String)> {
    let mut parts = header_value.split_whitespace();
    let scheme = parts.next()?;
    let encoded = parts.next()?;
    if parts.next().is_some() || !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    // Passwords may contain ':', usernames may not.
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}
