//! Host menus the modules plug into.
//!
//! Every menu with a hook is rendered the same way: base rows, then the
//! merged hook results, then the trailing "back" row.

use std::path::PathBuf;

use hooks::{insert_hook_buttons, HookContext, HookRegistry, KeyboardBuilder};
use teloxide::types::{InlineKeyboardMarkup, MessageId};

use common::types::UserId;

use crate::{
    callback::Callback,
    keyboards::Keyboards,
    store::Store,
    texts,
    utils::{edit_or_send_message, MessageSink, MessageTarget},
    ABOUT_VPN_HOOK, KEY_NAME_ARG, USER_ID_ARG, VIEW_KEY_MENU_HOOK,
};

/// Text with an optional inline keyboard, ready to be shown
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Screen {
    pub(crate) text: String,
    pub(crate) markup: Option<InlineKeyboardMarkup>,
    /// Shown with the text as caption when the file exists
    pub(crate) photo: Option<PathBuf>,
}

impl Screen {
    pub(crate) fn new(text: impl Into<String>, keyboard: KeyboardBuilder) -> Self {
        Self {
            text: text.into(),
            markup: Some(keyboard.build()),
            photo: None,
        }
    }
    pub(crate) fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: None,
            photo: None,
        }
    }
    /// Text with only a "back" button
    pub(crate) fn with_back(text: impl Into<String>, back: Callback) -> Self {
        Self::new(text, Keyboards::back(KeyboardBuilder::new(), back))
    }
    pub(crate) fn with_photo(self, photo: impl Into<PathBuf>) -> Self {
        Self {
            photo: Some(photo.into()),
            ..self
        }
    }
    pub(crate) async fn show<S>(self, sink: &S, target: MessageTarget) -> Option<MessageId>
    where
        S: MessageSink + ?Sized,
    {
        edit_or_send_message(sink, target, &self.text, self.markup, self.photo.as_deref()).await
    }
}

pub(crate) fn main_menu() -> Screen {
    Screen::new(texts::MAIN_MENU, Keyboards::main_menu())
}

pub(crate) async fn about_vpn(registry: &HookRegistry, user_id: UserId) -> Screen {
    let ctx = HookContext::new().with(USER_ID_ARG, user_id.0);
    let results = registry.invoke(ABOUT_VPN_HOOK, ctx).await;

    let keyboard = insert_hook_buttons(Keyboards::about_vpn(), results);
    Screen::new(texts::ABOUT_VPN, Keyboards::back(keyboard, Callback::MainMenu))
}

pub(crate) async fn keys<S>(store: &S, user_id: UserId) -> Screen
where
    S: Store + ?Sized,
{
    let keys = match store.user_keys(user_id).await {
        Ok(keys) => keys,
        Err(e) => {
            log::error!("failed to get keys of user {user_id}: {e}");
            return Screen::with_back(texts::SOMETHING_WRONG, Callback::MainMenu);
        }
    };
    let text = if keys.is_empty() {
        texts::NO_KEYS
    } else {
        texts::KEYS_LIST
    };
    Screen::new(text, Keyboards::back(Keyboards::keys(&keys), Callback::MainMenu))
}

pub(crate) async fn key_view<S>(
    registry: &HookRegistry,
    store: &S,
    user_id: UserId,
    key_name: &str,
) -> Screen
where
    S: Store + ?Sized,
{
    let record = match store.user_key(user_id, key_name).await {
        Ok(Some(record)) => record,
        Ok(None) => return Screen::with_back(texts::KEY_NOT_FOUND, Callback::Keys),
        Err(e) => {
            log::error!("failed to get key {key_name} of user {user_id}: {e}");
            return Screen::with_back(texts::SOMETHING_WRONG, Callback::Keys);
        }
    };

    let ctx = HookContext::new()
        .with(KEY_NAME_ARG, key_name)
        .with(USER_ID_ARG, user_id.0);
    let results = registry.invoke(VIEW_KEY_MENU_HOOK, ctx).await;

    let keyboard = insert_hook_buttons(Keyboards::key_view(key_name), results);
    Screen::new(
        texts::key_info(&record.name, record.subscription_link()),
        Keyboards::back(keyboard, Callback::Keys),
    )
}

/// Host fallback for "connect TV" when no module replaced the button
pub(crate) fn connect_tv(key_name: &str) -> Screen {
    Screen::with_back(texts::TV_INSTRUCTIONS, Callback::view_key(key_name))
}

#[cfg(test)]
mod tests {
    use hooks::HookResult;
    use teloxide::types::InlineKeyboardButton as Btn;

    use super::*;
    use crate::store::{tests::record, MemoryStore};

    fn rows(screen: &Screen) -> Vec<Vec<Btn>> {
        screen
            .markup
            .as_ref()
            .map(|m| m.inline_keyboard.clone())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_key_view_hook_buttons_before_back() {
        common::init_logger();

        let store = MemoryStore::new(vec![record("k1", 1, Some("vless://a"), None)], vec![]);
        let mut registry = HookRegistry::new();
        registry.register_fn(VIEW_KEY_MENU_HOOK, |ctx| {
            let key = ctx.require_str(KEY_NAME_ARG)?;
            Ok(HookResult::button(Btn::callback("extra", format!("extra|{key}"))))
        });

        let screen = key_view(&registry, &store, UserId(1), "k1").await;
        similar_asserts::assert_eq!(
            rows(&screen),
            vec![
                vec![Btn::callback(texts::CONNECT_TV_BUTTON, "connect_tv|k1")],
                vec![Btn::callback("extra", "extra|k1")],
                vec![Btn::callback(texts::BACK, "keys")],
            ]
        );
        assert_eq!(screen.text, texts::key_info("k1", Some("vless://a")));
    }

    #[tokio::test]
    async fn test_key_view_missing_key() {
        common::init_logger();

        let store = MemoryStore::default();
        let screen = key_view(&HookRegistry::new(), &store, UserId(1), "nope").await;
        assert_eq!(screen, Screen::with_back(texts::KEY_NOT_FOUND, Callback::Keys));
    }

    #[tokio::test]
    async fn test_key_view_of_other_user() {
        common::init_logger();

        let store = MemoryStore::new(vec![record("k1", 1, Some("vless://secret"), None)], vec![]);
        let screen = key_view(&HookRegistry::new(), &store, UserId(2), "k1").await;
        assert_eq!(screen, Screen::with_back(texts::KEY_NOT_FOUND, Callback::Keys));
        assert!(!screen.text.contains("vless://secret"));
    }

    #[tokio::test]
    async fn test_about_without_hooks() {
        common::init_logger();

        let screen = about_vpn(&HookRegistry::new(), UserId(1)).await;
        assert_eq!(rows(&screen), vec![vec![Btn::callback(texts::BACK, "main_menu")]]);
    }

    #[tokio::test]
    async fn test_keys_list() {
        common::init_logger();

        let store = MemoryStore::new(
            vec![record("k1", 1, None, None), record("k2", 2, None, None)],
            vec![],
        );
        let screen = keys(&store, UserId(1)).await;
        assert_eq!(screen.text, texts::KEYS_LIST);
        assert_eq!(
            rows(&screen),
            vec![
                vec![Btn::callback("🔑 k1", "view_key|k1")],
                vec![Btn::callback(texts::BACK, "main_menu")],
            ]
        );

        let screen = keys(&store, UserId(3)).await;
        assert_eq!(screen.text, texts::NO_KEYS);
    }

    #[tokio::test]
    async fn test_show_with_photo() {
        use crate::utils::tests::{FakeSink, NEW_ID};
        use teloxide::types::{ChatId, MessageId};

        common::init_logger();

        let photo = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        let target = MessageTarget::new(ChatId(1), Some(MessageId(7)));

        let sink = FakeSink::default();
        let id = main_menu().with_photo(&photo).show(&sink, target).await;
        assert_eq!(id, Some(NEW_ID));
        assert_eq!(sink.calls(), ["send_photo", "delete"]);

        let sink = FakeSink::default();
        let id = main_menu().show(&sink, target).await;
        assert_eq!(id, Some(MessageId(7)));
        assert_eq!(sink.calls(), ["edit"]);
    }
}
