use std::sync::Arc;

use crate::application::blog_service::BlogService;
use crate::data::repositories::sqlite::post_repository::SqlitePostRepository;
use crate::infrastructure::credentials::AdminCredentials;

pub(crate) mod http;
pub(crate) mod telegram;

pub(crate) type SharedBlogService = Arc<BlogService<SqlitePostRepository>>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) blog_service: SharedBlogService,
    pub(crate) credentials: Arc<AdminCredentials>,
}

impl AppState {
    pub(crate) fn new(blog_service: SharedBlogService, credentials: Arc<AdminCredentials>) -> Self {
        Self {
            blog_service,
            credentials,
        }
    }
}
