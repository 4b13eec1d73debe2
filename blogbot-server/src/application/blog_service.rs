use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest};

pub(crate) struct BlogService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> BlogService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn init_storage(&self) -> Result<(), DomainError> {
        self.repo.create_table().await
    }

    pub(crate) async fn is_healthy(&self) -> bool {
        self.repo.check_connection().await
    }

    pub(crate) async fn create_post(&self, req: CreatePostRequest) -> Result<Post, DomainError> {
        let req = req.validate()?;

        let new_post = NewPost {
            title: req.title,
            content: req.content,
        };
        let id = self.repo.add_post(new_post).await?;

        // Can only be missing if a concurrent delete won the race.
        self.get_post(id).await
    }

    pub(crate) async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
        self.repo
            .get_post_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))
    }

    pub(crate) async fn find_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        self.repo.get_post_by_id(id).await
    }

    pub(crate) async fn update_post(
        &self,
        post_id: i64,
        req: UpdatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;
        let patch = PostPatch {
            title: req.title,
            content: req.content,
        };

        if !self.repo.update_post(post_id, patch).await? {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }
        self.get_post(post_id).await
    }

    pub(crate) async fn delete_post(&self, post_id: i64) -> Result<(), DomainError> {
        let deleted = self.repo.delete_post(post_id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }
        Ok(())
    }

    pub(crate) async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.repo.get_all_posts().await
    }
}
