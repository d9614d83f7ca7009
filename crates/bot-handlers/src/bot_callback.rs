use teloxide::prelude::*;

use common::types::UserId;

use crate::{
    callback::Callback, happ_tv, legal_docs, menus, texts, utils::MessageTarget, BotState,
};

pub async fn callback_handler(bot: Bot, q: CallbackQuery, state: BotState) -> ResponseResult<()> {
    let answer_err = bot.answer_callback_query(&q.id).show_alert(true);
    let user_id: UserId = q.from.id.into();

    let Some(data) = &q.data else {
        log::error!("got empty callback {} from user {user_id}", q.id);
        answer_err.text(texts::INVALID_CALLBACK).await?;
        return Ok(());
    };
    log::debug!("got callback: {data:?}");

    let callback = match Callback::try_from(data.as_str()) {
        Ok(callback) => callback,
        Err(e) => {
            log::error!("invalid callback {data:?}: {e}");
            answer_err.text(texts::INVALID_CALLBACK).await?;
            return Ok(());
        }
    };

    let target = MessageTarget::callback(&q);
    let screen = match callback {
        Callback::HappTv { key_name } => {
            return happ_tv::handlers::start(bot, &q, &state, &key_name).await;
        }
        Callback::HappTvCancel { key_name } => {
            return happ_tv::handlers::cancel(bot, &q, &state, &key_name).await;
        }
        Callback::LegalDocsMenu => return legal_docs::handlers::show_menu(bot, &q, &state).await,
        Callback::AcceptLegalDocs => return legal_docs::handlers::accept(bot, &q).await,
        Callback::MainMenu => menus::main_menu(),
        Callback::AboutVpn => menus::about_vpn(&state.registry, user_id).await,
        Callback::Keys => menus::keys(state.store.as_ref(), user_id).await,
        Callback::ViewKey { key_name } => {
            menus::key_view(&state.registry, state.store.as_ref(), user_id, &key_name).await
        }
        Callback::ConnectTv { key_name } => menus::connect_tv(&key_name),
    };

    bot.answer_callback_query(&q.id).await?;
    screen.show(&bot, target).await;
    Ok(())
}
