use teloxide::prelude::*;

use crate::{menus, utils::MessageTarget, BotState};

use super::texts;

pub(crate) async fn show_menu(bot: Bot, q: &CallbackQuery, state: &BotState) -> ResponseResult<()> {
    bot.answer_callback_query(&q.id).await?;
    super::menu_screen(&state.legal_docs)
        .show(&bot, MessageTarget::callback(q))
        .await;
    Ok(())
}

pub(crate) async fn accept(bot: Bot, q: &CallbackQuery) -> ResponseResult<()> {
    bot.answer_callback_query(&q.id)
        .text(texts::DOCUMENTS_ACCEPTED_ALERT)
        .await?;

    let target = MessageTarget::callback(q);
    menus::Screen::text(texts::DOCUMENTS_ACCEPTED_MESSAGE)
        .show(&bot, target)
        .await;
    log::info!(tg = true; "user {} accepted legal documents", q.from.id.0);

    menus::main_menu()
        .show(&bot, MessageTarget::new(target.chat_id, None))
        .await;
    Ok(())
}

/// dptree filter for /start
pub(crate) async fn is_first_launch(msg: Message, state: BotState) -> bool {
    let Some(user_id) = msg.chat.id.as_user() else {
        return false;
    };
    super::is_first_launch(state.store.as_ref(), &state.legal_docs, user_id.into()).await
}

pub(crate) async fn show_first_launch(bot: Bot, msg: Message, state: BotState) -> ResponseResult<()> {
    log::debug!("showing legal documents on first launch to {}", msg.chat.id.0);
    super::first_launch_screen(&state.legal_docs)
        .show(&bot, MessageTarget::new(msg.chat.id, None))
        .await;
    Ok(())
}
