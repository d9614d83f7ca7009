use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Copy, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "Главное меню")]
    Start,
    #[command(description = "Мои подписки")]
    Keys,
    #[command(description = "О сервисе")]
    About,
}
