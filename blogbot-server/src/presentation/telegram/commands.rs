use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub(crate) enum Command {
    #[command(description = "начать работу")]
    Start,
    #[command(description = "посмотреть все посты")]
    Posts,
}
