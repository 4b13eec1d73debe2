use chrono::{DateTime, Utc};
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use teloxide::utils::command::BotCommands;
use teloxide::utils::html;

use crate::domain::post::Post;
use crate::presentation::telegram::commands::Command;

pub(crate) const TITLE_DISPLAY_LIMIT: usize = 30;
/// Telegram's cap on message text, counted after HTML entities are parsed.
pub(crate) const MESSAGE_TEXT_LIMIT: usize = 4096;
const POST_TITLE_LIMIT: usize = 256;
const ELLIPSIS: &str = "...";

pub(crate) const NO_POSTS: &str = "Пока нет ни одного поста";
pub(crate) const POST_NOT_FOUND: &str = "Пост не найден. Возможно, он был удален.";
pub(crate) const LOAD_POSTS_FAILED: &str =
    "Произошла ошибка при загрузке постов\nПопробуй позже";
pub(crate) const LOAD_FAILED_ALERT: &str = "Произошла ошибка при загрузке. Попробуй позже.";
const BACK_BUTTON: &str = "Назад к списку";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CallbackAction {
    ShowPost(i64),
    BackToPosts,
}

impl CallbackAction {
    const POST_PREFIX: &'static str = "post_";
    const BACK_TO_POSTS: &'static str = "back_to_posts";

    pub(crate) fn parse(data: &str) -> Option<Self> {
        if data == Self::BACK_TO_POSTS {
            return Some(Self::BackToPosts);
        }
        data.strip_prefix(Self::POST_PREFIX)?
            .parse()
            .ok()
            .map(Self::ShowPost)
    }

    pub(crate) fn to_data(self) -> String {
        match self {
            Self::ShowPost(id) => format!("{}{id}", Self::POST_PREFIX),
            Self::BackToPosts => Self::BACK_TO_POSTS.to_string(),
        }
    }
}

/// Counts characters, not bytes; titles are usually Cyrillic.
pub(crate) fn truncate_title(title: &str) -> String {
    truncate_chars(title, TITLE_DISPLAY_LIMIT)
}

fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let head: String = text
        .chars()
        .take(limit.saturating_sub(ELLIPSIS.len()))
        .collect();
    format!("{head}{ELLIPSIS}")
}

pub(crate) fn start_text(admin_url: &str) -> String {
    format!(
        "Привет!\n\n\
         Используй /posts - посмотреть все посты\n\n\
         Для управления постами используйте веб-интерфейс\n{admin_url}"
    )
}

pub(crate) fn help_text() -> String {
    format!("Неизвестная команда\n\n{}", Command::descriptions())
}

pub(crate) fn post_list_text(count: usize) -> String {
    format!("Найдено постов: {count}\n\nВыбери пост для просмотра:")
}

pub(crate) fn posts_keyboard(posts: &[Post]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(posts.iter().map(|post| {
        vec![InlineKeyboardButton::callback(
            truncate_title(&post.title),
            CallbackAction::ShowPost(post.id).to_data(),
        )]
    }))
}

pub(crate) fn back_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[InlineKeyboardButton::callback(
        BACK_BUTTON,
        CallbackAction::BackToPosts.to_data(),
    )]])
}

/// HTML body of a single post; user text is escaped.
///
/// Title and content are cut before escaping so the visible text fits in one message.
pub(crate) fn post_text(post: &Post) -> String {
    let title = truncate_chars(&post.title, POST_TITLE_LIMIT);
    let footer = format!("Дата создания: {}", format_created_at(post.created_at));
    let budget = MESSAGE_TEXT_LIMIT
        - title.chars().count()
        - footer.chars().count()
        - "\n\n\n\n".len();
    let content = truncate_chars(&post.content, budget);

    format!(
        "<b>{}</b>\n\n{}\n\n{footer}",
        html::escape(&title),
        html::escape(&content),
    )
}

pub(crate) fn format_created_at(created_at: DateTime<Utc>) -> String {
    created_at.format("%d.%m.%Y %H:%M").to_string()
}
