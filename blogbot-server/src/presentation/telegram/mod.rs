//! Read-only Telegram front-end over the post store (long polling).

use std::sync::Arc;

use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use tracing::info;

use crate::infrastructure::settings::Settings;
use crate::presentation::SharedBlogService;

pub(crate) mod commands;
pub(crate) mod handlers;
pub(crate) mod screens;
pub(crate) mod views;

use commands::Command;

type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies injected into every bot handler.
#[derive(Clone)]
pub(crate) struct BotState {
    pub(crate) blog_service: SharedBlogService,
    pub(crate) admin_url: Arc<str>,
}

pub(crate) async fn run_bot(settings: &Settings, blog_service: SharedBlogService) -> anyhow::Result<()> {
    let bot = Bot::new(settings.require_bot_token()?);
    let state = BotState {
        blog_service,
        admin_url: settings.admin_url().into(),
    };

    info!("starting Telegram bot");
    // Updates of one chat are handled in order; different chats run concurrently.
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .error_handler(LoggingErrorHandler::with_custom_text(
            "an error occurred in a bot handler",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Telegram bot stopped");
    Ok(())
}

fn schema() -> UpdateHandler<HandlerError> {
    let message_handler = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handlers::handle_command),
        )
        .branch(dptree::endpoint(handlers::handle_unknown));

    let callback_handler = Update::filter_callback_query().endpoint(handlers::handle_callback);

    dptree::entry()
        .branch(message_handler)
        .branch(callback_handler)
}
