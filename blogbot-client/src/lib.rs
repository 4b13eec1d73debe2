//! Клиентская библиотека для HTTP API блога (`blogbot-server api`).
//!
//! `BlogClient` читает посты без авторизации, а для изменяющих операций
//! использует basic-auth с учётными данными администратора.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{BlogClientError, BlogClientResult};
pub use models::{Health, Post};

use http_client::{Credentials, HttpClient};

#[derive(Debug, Clone)]
/// Клиент HTTP API блога.
pub struct BlogClient {
    http_client: HttpClient,
    credentials: Option<Credentials>,
}

impl BlogClient {
    /// Создаёт клиент для сервера с базовым URL, например `http://127.0.0.1:8000`.
    pub fn new(base_url: impl Into<String>) -> BlogClientResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(base_url)?,
            credentials: None,
        })
    }

    /// Устанавливает учётные данные администратора для изменяющих операций.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Возвращает `true`, если учётные данные установлены.
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Проверяет доступность API и базы данных.
    pub async fn health(&self) -> BlogClientResult<Health> {
        self.http_client.health().await
    }

    /// Возвращает все посты, новые первыми.
    pub async fn list_posts(&self) -> BlogClientResult<Vec<Post>> {
        self.http_client.list_posts().await
    }

    /// Возвращает пост по идентификатору.
    pub async fn get_post(&self, id: i64) -> BlogClientResult<Post> {
        self.http_client.get_post(id).await
    }

    /// Создаёт новый пост.
    ///
    /// Требует учётные данные администратора.
    pub async fn create_post(&self, title: &str, content: &str) -> BlogClientResult<Post> {
        let credentials = self.require_credentials()?;
        self.http_client
            .create_post(credentials, title, content)
            .await
    }

    /// Полностью заменяет заголовок и содержимое поста.
    ///
    /// Требует учётные данные администратора.
    pub async fn update_post(&self, id: i64, title: &str, content: &str) -> BlogClientResult<Post> {
        let credentials = self.require_credentials()?;
        self.http_client
            .update_post(credentials, id, title, content)
            .await
    }

    /// Удаляет пост по идентификатору.
    ///
    /// Требует учётные данные администратора.
    pub async fn delete_post(&self, id: i64) -> BlogClientResult<()> {
        let credentials = self.require_credentials()?;
        self.http_client.delete_post(credentials, id).await
    }

    fn require_credentials(&self) -> BlogClientResult<&Credentials> {
        self.credentials.as_ref().ok_or(BlogClientError::Unauthorized)
    }
}
