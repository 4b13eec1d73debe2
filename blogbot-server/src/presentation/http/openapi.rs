use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::http::handlers::posts::{CreatePostDto, MessageDto, PostDto, UpdatePostDto};
use crate::presentation::http::handlers::system::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    info(title = "Blog Admin API", description = "Manage blog posts shown by the Telegram bot"),
    paths(
        crate::presentation::http::handlers::system::health,
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::get_post,
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::posts::update_post,
        crate::presentation::http::handlers::posts::delete_post
    ),
    components(
        schemas(
            CreatePostDto,
            UpdatePostDto,
            PostDto,
            MessageDto,
            HealthResponse
        )
    ),
    tags(
        (name = "system", description = "Liveness"),
        (name = "posts", description = "Post endpoints")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "basic_auth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
        );
        openapi.components = Some(components);
    }
}
