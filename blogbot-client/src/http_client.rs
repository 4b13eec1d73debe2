use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{BlogClientError, BlogClientResult};
use crate::models::{Health, Post};

#[derive(Debug, Serialize)]
struct PostPayloadDto<'a> {
    title: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    detail: Option<String>,
}

#[derive(Clone)]
pub(crate) struct Credentials {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
/// HTTP-транспорт для REST API `blogbot-server`.
pub(crate) struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    pub(crate) fn new(base_url: impl Into<String>) -> BlogClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str, credentials: Option<&Credentials>) -> RequestBuilder {
        let request = self.client.request(method, self.endpoint(path));
        match credentials {
            Some(credentials) => {
                request.basic_auth(&credentials.username, Some(&credentials.password))
            }
            None => request,
        }
    }

    async fn decode_error(response: reqwest::Response) -> BlogClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body
                .detail
                .unwrap_or_else(|| format!("http status {status}")),
            Err(_) => format!("http status {status}"),
        };
        BlogClientError::from_http_status(status, Some(message))
    }

    /// отправляет запрос и проверяет статус ответа
    async fn execute(request: RequestBuilder) -> BlogClientResult<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(BlogClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response)
    }

    async fn execute_json<T: DeserializeOwned>(request: RequestBuilder) -> BlogClientResult<T> {
        Self::execute(request)
            .await?
            .json::<T>()
            .await
            .map_err(BlogClientError::from_reqwest)
    }

    pub(crate) async fn health(&self) -> BlogClientResult<Health> {
        Self::execute_json(self.request(Method::GET, "/health", None)).await
    }

    pub(crate) async fn list_posts(&self) -> BlogClientResult<Vec<Post>> {
        Self::execute_json(self.request(Method::GET, "/posts", None)).await
    }

    pub(crate) async fn get_post(&self, id: i64) -> BlogClientResult<Post> {
        Self::execute_json(self.request(Method::GET, &format!("/posts/{id}"), None)).await
    }

    pub(crate) async fn create_post(
        &self,
        credentials: &Credentials,
        title: &str,
        content: &str,
    ) -> BlogClientResult<Post> {
        let payload = PostPayloadDto { title, content };
        let request = self
            .request(Method::POST, "/posts", Some(credentials))
            .json(&payload);
        Self::execute_json(request).await
    }

    pub(crate) async fn update_post(
        &self,
        credentials: &Credentials,
        id: i64,
        title: &str,
        content: &str,
    ) -> BlogClientResult<Post> {
        let payload = PostPayloadDto { title, content };
        let request = self
            .request(Method::PUT, &format!("/posts/{id}"), Some(credentials))
            .json(&payload);
        Self::execute_json(request).await
    }

    pub(crate) async fn delete_post(&self, credentials: &Credentials, id: i64) -> BlogClientResult<()> {
        Self::execute(self.request(Method::DELETE, &format!("/posts/{id}"), Some(credentials)))
            .await?;
        Ok(())
    }
}
