use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `blogbot-client`.
pub enum BlogClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Требуется авторизация (нет учётных данных или они неверны).
    #[error("unauthorized")]
    Unauthorized,

    /// Запрошенный пост не найден.
    #[error("not found")]
    NotFound,

    /// Сервер сообщил, что база данных недоступна.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Некорректный запрос или ошибка сервера.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Результат операций `blogbot-client`.
pub type BlogClientResult<T> = Result<T, BlogClientError>;

impl BlogClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| format!("http status {status}"));
        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Self::Unauthorized
            }
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            reqwest::StatusCode::SERVICE_UNAVAILABLE => Self::Unavailable(message),
            _ => Self::InvalidRequest(message),
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::BlogClientError;

    #[test]
    fn maps_statuses_to_variants() {
        assert!(matches!(
            BlogClientError::from_http_status(reqwest::StatusCode::UNAUTHORIZED, None),
            BlogClientError::Unauthorized
        ));
        assert!(matches!(
            BlogClientError::from_http_status(reqwest::StatusCode::NOT_FOUND, None),
            BlogClientError::NotFound
        ));
        match BlogClientError::from_http_status(
            reqwest::StatusCode::SERVICE_UNAVAILABLE,
            Some("database connection failed".to_string()),
        ) {
            BlogClientError::Unavailable(message) => {
                assert_eq!(message, "database connection failed")
            }
            other => panic!("expected Unavailable, got {other:?}"),
        }
        match BlogClientError::from_http_status(reqwest::StatusCode::UNPROCESSABLE_ENTITY, None) {
            BlogClientError::InvalidRequest(message) => assert!(message.contains("422")),
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
    }
}
