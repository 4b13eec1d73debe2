use teloxide::payloads::{AnswerCallbackQuerySetters, EditMessageTextSetters, SendMessageSetters};
use teloxide::prelude::*;
use teloxide::types::{MessageId, ParseMode};
use teloxide::{ApiError, RequestError};
use tracing::{debug, error};

use crate::presentation::telegram::commands::Command;
use crate::presentation::telegram::screens::{self, Screen};
use crate::presentation::telegram::views::{self, CallbackAction};
use crate::presentation::telegram::{BotState, HandlerError};

pub(crate) async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: BotState,
) -> Result<(), HandlerError> {
    match cmd {
        Command::Start => {
            bot.send_message(msg.chat.id, views::start_text(&state.admin_url))
                .await?;
        }
        Command::Posts => match screens::post_list(state.blog_service.as_ref()).await {
            Ok(screen) => send_screen(&bot, msg.chat.id, screen).await?,
            Err(err) => {
                error!(error = %err, chat_id = ?msg.chat.id, "failed to load posts");
                bot.send_message(msg.chat.id, views::LOAD_POSTS_FAILED)
                    .await?;
            }
        },
    }
    Ok(())
}

pub(crate) async fn handle_unknown(bot: Bot, msg: Message) -> Result<(), HandlerError> {
    bot.send_message(msg.chat.id, views::help_text()).await?;
    Ok(())
}

pub(crate) async fn handle_callback(
    bot: Bot,
    query: CallbackQuery,
    state: BotState,
) -> Result<(), HandlerError> {
    let action = query.data.as_deref().and_then(CallbackAction::parse);
    let target = query
        .regular_message()
        .map(|message| (message.chat.id, message.id));

    let (Some(action), Some((chat_id, message_id))) = (action, target) else {
        debug!(data = ?query.data, "ignoring callback without a usable action or message");
        bot.answer_callback_query(query.id.clone()).await?;
        return Ok(());
    };

    let screen = match action {
        CallbackAction::ShowPost(id) => {
            screens::post_details(state.blog_service.as_ref(), id).await
        }
        CallbackAction::BackToPosts => screens::post_list(state.blog_service.as_ref()).await,
    };

    let failed = match screen {
        Ok(screen) => {
            let edited = edit_screen(&bot, chat_id, message_id, screen).await;
            let failed = edit_failed(&edited);
            if let (true, Err(err)) = (failed, &edited) {
                error!(error = %err, chat_id = ?chat_id, ?action, "failed to edit callback message");
            }
            failed
        }
        Err(err) => {
            error!(error = %err, chat_id = ?chat_id, ?action, "failed to render callback");
            true
        }
    };

    let answer = bot.answer_callback_query(query.id.clone());
    if failed {
        answer.text(views::LOAD_FAILED_ALERT).show_alert(true).await?;
    } else {
        answer.await?;
    }
    Ok(())
}

/// Re-showing the current screen (a repeated "back" tap) is not a failure.
fn edit_failed(result: &Result<(), RequestError>) -> bool {
    !matches!(
        result,
        Ok(()) | Err(RequestError::Api(ApiError::MessageNotModified))
    )
}

async fn send_screen(bot: &Bot, chat_id: ChatId, screen: Screen) -> Result<(), RequestError> {
    let request = bot
        .send_message(chat_id, screen.text)
        .parse_mode(ParseMode::Html);
    match screen.keyboard {
        Some(keyboard) => request.reply_markup(keyboard).await?,
        None => request.await?,
    };
    Ok(())
}

async fn edit_screen(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    screen: Screen,
) -> Result<(), RequestError> {
    let request = bot
        .edit_message_text(chat_id, message_id, screen.text)
        .parse_mode(ParseMode::Html);
    match screen.keyboard {
        Some(keyboard) => request.reply_markup(keyboard).await?,
        None => request.await?,
    };
    Ok(())
}
