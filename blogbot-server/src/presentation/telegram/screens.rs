use teloxide::types::InlineKeyboardMarkup;

use crate::application::blog_service::BlogService;
use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::presentation::telegram::views;

/// Rendered bot message: HTML text plus an optional inline keyboard.
#[derive(Debug, Clone)]
pub(crate) struct Screen {
    pub(crate) text: String,
    pub(crate) keyboard: Option<InlineKeyboardMarkup>,
}

impl Screen {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }
}

pub(crate) async fn post_list<R: PostRepository>(
    service: &BlogService<R>,
) -> Result<Screen, DomainError> {
    let posts = service.list_posts().await?;
    if posts.is_empty() {
        return Ok(Screen::text(views::NO_POSTS));
    }

    Ok(Screen {
        text: views::post_list_text(posts.len()),
        keyboard: Some(views::posts_keyboard(&posts)),
    })
}

/// A missing post renders a "possibly deleted" notice rather than failing.
pub(crate) async fn post_details<R: PostRepository>(
    service: &BlogService<R>,
    id: i64,
) -> Result<Screen, DomainError> {
    let Some(post) = service.find_post(id).await? else {
        return Ok(Screen::text(views::POST_NOT_FOUND));
    };

    Ok(Screen {
        text: views::post_text(&post),
        keyboard: Some(views::back_keyboard()),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::{post_details, post_list};
    use crate::application::blog_service::BlogService;
    use crate::application::blog_service::tests::{FakePostRepo, sample_post};
    use crate::domain::error::DomainError;
    use crate::domain::post::Post;
    use crate::presentation::telegram::views;

    #[tokio::test]
    async fn empty_store_renders_no_posts_without_keyboard() {
        let service = BlogService::new(FakePostRepo::new());

        let screen = post_list(&service).await.expect("screen must render");

        assert_eq!(screen.text, views::NO_POSTS);
        assert!(screen.keyboard.is_none());
    }

    #[tokio::test]
    async fn list_renders_count_and_buttons_newest_first() {
        let now = Utc::now();
        let older = Post::new(1, "older", "a", now - Duration::hours(1));
        let newer = Post::new(2, "newer", "b", now);
        let service = BlogService::new(FakePostRepo::with_posts(vec![older, newer]));

        let screen = post_list(&service).await.expect("screen must render");

        assert_eq!(screen.text, views::post_list_text(2));
        let keyboard = screen.keyboard.expect("list must carry a keyboard");
        let titles: Vec<&str> = keyboard
            .inline_keyboard
            .iter()
            .map(|row| row[0].text.as_str())
            .collect();
        assert_eq!(titles, vec!["newer", "older"]);
    }

    #[tokio::test]
    async fn details_render_post_with_back_button() {
        let service = BlogService::new(FakePostRepo::with_posts(vec![sample_post(
            5, "Title", "Body",
        )]));

        let screen = post_details(&service, 5).await.expect("screen must render");

        assert!(screen.text.contains("<b>Title</b>"));
        assert!(screen.text.contains("Body"));
        let keyboard = screen.keyboard.expect("details must carry a back button");
        assert_eq!(keyboard.inline_keyboard.len(), 1);
    }

    #[tokio::test]
    async fn details_for_deleted_post_show_notice() {
        let service = BlogService::new(FakePostRepo::new());

        let screen = post_details(&service, 5).await.expect("screen must render");

        assert_eq!(screen.text, views::POST_NOT_FOUND);
        assert!(screen.keyboard.is_none());
    }

    #[tokio::test]
    async fn storage_faults_are_returned_to_the_handler() {
        let service = BlogService::new(FakePostRepo::failing());

        let err = post_list(&service).await.expect_err("list must fail");
        assert!(matches!(err, DomainError::Storage(_)));
        let err = post_details(&service, 1).await.expect_err("details must fail");
        assert!(matches!(err, DomainError::Storage(_)));
    }
}
