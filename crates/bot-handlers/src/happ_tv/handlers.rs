use teloxide::prelude::*;

use common::types::ConversationKey;

use crate::{menus, texts, utils::MessageTarget, BotState, KEY_VIEW_IMAGE};

fn message_conversation(msg: &Message) -> Option<ConversationKey> {
    msg.chat
        .id
        .as_user()
        .map(|user_id| ConversationKey::new(msg.chat.id, user_id))
}

fn callback_conversation(q: &CallbackQuery, target: MessageTarget) -> ConversationKey {
    ConversationKey::new(target.chat_id, q.from.id)
}

/// dptree filter: plain text in a conversation waiting for a code
pub(crate) fn is_code_message(msg: Message, state: BotState) -> bool {
    let is_text = msg.text().is_some_and(|text| !text.starts_with('/'));
    let waiting = state
        .happ_tv
        .as_ref()
        .zip(message_conversation(&msg))
        .is_some_and(|(happ, conversation)| happ.is_waiting(&conversation));
    is_text && waiting
}

pub(crate) async fn code_entered(bot: Bot, msg: Message, state: BotState) -> ResponseResult<()> {
    let (Some(happ), Some(conversation), Some(text)) =
        (&state.happ_tv, message_conversation(&msg), msg.text())
    else {
        return Ok(());
    };
    if let Some(screen) = happ.code_entered(conversation, text).await {
        screen.show(&bot, MessageTarget::message(&msg)).await;
    }
    Ok(())
}

pub(crate) async fn start(
    bot: Bot,
    q: &CallbackQuery,
    state: &BotState,
    key_name: &str,
) -> ResponseResult<()> {
    let Some(happ) = &state.happ_tv else {
        bot.answer_callback_query(&q.id)
            .text(texts::INVALID_CALLBACK)
            .show_alert(true)
            .await?;
        return Ok(());
    };
    bot.answer_callback_query(&q.id).await?;

    let target = MessageTarget::callback(q);
    happ.start(callback_conversation(q, target), key_name)
        .show(&bot, target)
        .await;
    Ok(())
}

pub(crate) async fn cancel(
    bot: Bot,
    q: &CallbackQuery,
    state: &BotState,
    key_name: &str,
) -> ResponseResult<()> {
    bot.answer_callback_query(&q.id).await?;

    let target = MessageTarget::callback(q);
    if let Some(happ) = &state.happ_tv {
        happ.cancel(callback_conversation(q, target), key_name);
    }
    menus::key_view(&state.registry, state.store.as_ref(), q.from.id.into(), key_name)
        .await
        .with_photo(KEY_VIEW_IMAGE)
        .show(&bot, target)
        .await;
    Ok(())
}
