use axum::{Json, extract::State, http::StatusCode};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::extract::{AppJson, AppPath};
use crate::presentation::http::middleware::auth::AdminUser;

/// Display shift applied to `created_at` in every response; storage keeps UTC.
pub(crate) const DISPLAY_OFFSET_HOURS: i64 = 3;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreatePostDto {
    #[validate(length(min = 1))]
    pub(crate) title: String,
    #[validate(length(min = 1))]
    pub(crate) content: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdatePostDto {
    #[validate(length(min = 1))]
    pub(crate) title: String,
    #[validate(length(min = 1))]
    pub(crate) content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) created_at: NaiveDateTime,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct MessageDto {
    pub(crate) message: String,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            created_at: post.created_at.naive_utc() + Duration::hours(DISPLAY_OFFSET_HOURS),
        }
    }
}

#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    responses(
        (status = 200, description = "All posts, newest first", body = [PostDto]),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<PostDto>>)> {
    let posts = state.blog_service.list_posts().await?;

    Ok((
        StatusCode::OK,
        Json(posts.into_iter().map(PostDto::from).collect()),
    ))
}

#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let post = state.blog_service.get_post(id).await?;

    Ok((StatusCode::OK, Json(PostDto::from(post))))
}

#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    security(
        ("basic_auth" = [])
    ),
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Malformed body"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    admin: AdminUser,
    AppJson(dto): AppJson<CreatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    dto.validate()?;
    let req = CreatePostRequest {
        title: dto.title,
        content: dto.content,
    };

    let post = state.blog_service.create_post(req).await?;
    info!(post_id = post.id, admin = %admin.username, "post created");

    Ok((StatusCode::CREATED, Json(PostDto::from(post))))
}

#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "posts",
    security(
        ("basic_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post replaced", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    admin: AdminUser,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    dto.validate()?;
    let req = UpdatePostRequest {
        title: dto.title,
        content: dto.content,
    };

    let post = state.blog_service.update_post(id, req).await?;
    info!(post_id = id, admin = %admin.username, "post updated");

    Ok((StatusCode::OK, Json(PostDto::from(post))))
}

#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "posts",
    security(
        ("basic_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post deleted", body = MessageDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    admin: AdminUser,
    AppPath(id): AppPath<i64>,
) -> AppResult<(StatusCode, Json<MessageDto>)> {
    state.blog_service.delete_post(id).await?;
    info!(post_id = id, admin = %admin.username, "post deleted");

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Post deleted".to_string(),
        }),
    ))
}
