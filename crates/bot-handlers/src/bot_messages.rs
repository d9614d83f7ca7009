use teloxide::prelude::*;

use common::types::UserId;

use crate::{commands::Command, menus, texts, utils::MessageTarget, BotState};

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: BotState,
) -> ResponseResult<()> {
    let Some(user_id) = msg.chat.id.as_user() else {
        bot.send_message(msg.chat.id, texts::PRIVATE_ONLY).await?;
        return Ok(());
    };
    let user_id: UserId = user_id.into();
    let target = MessageTarget::new(msg.chat.id, None);

    let screen = match cmd {
        Command::Start => menus::main_menu(),
        Command::Keys => menus::keys(state.store.as_ref(), user_id).await,
        Command::About => menus::about_vpn(&state.registry, user_id).await,
    };
    screen.show(&bot, target).await;

    Ok(())
}

pub async fn message_handler(bot: Bot, msg: Message) -> ResponseResult<()> {
    bot.send_message(msg.chat.id, texts::UNKNOWN_MESSAGE).await?;
    Ok(())
}
