use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) content: String,
}

#[derive(Debug, Clone)]
pub(crate) struct PostPatch {
    pub(crate) title: String,
    pub(crate) content: String,
}

/// Single-table post storage shared by the HTTP API and the bot.
///
/// `update_post`/`delete_post` report a missing row as `Ok(false)`; `Err` is reserved for
/// storage faults. `check_connection` never fails, it reduces any fault to `false`.
#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_table(&self) -> Result<(), DomainError>;
    async fn add_post(&self, input: NewPost) -> Result<i64, DomainError>;
    async fn get_all_posts(&self) -> Result<Vec<Post>, DomainError>;
    async fn get_post_by_id(&self, id: i64) -> Result<Option<Post>, DomainError>;
    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<bool, DomainError>;
    async fn delete_post(&self, id: i64) -> Result<bool, DomainError>;
    async fn check_connection(&self) -> bool;
}
