use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Публичная модель поста.
pub struct Post {
    /// Идентификатор поста.
    pub id: i64,
    /// Заголовок поста.
    pub title: String,
    /// Содержимое поста.
    pub content: String,
    /// Дата и время создания в часовом поясе отображения сервера (UTC+3).
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Ответ `GET /health`.
pub struct Health {
    /// Статус, `healthy` при успехе.
    pub status: String,
    /// Пояснение от сервера.
    pub message: String,
}
