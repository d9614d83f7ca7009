//! Legal documents: terms, privacy policy and the like, opened as web apps.
//!
//! Documents are shown in the "about service" menu, either behind one menu
//! button or directly, and once more on the first /start of a new user.

pub(crate) mod handlers;
pub(crate) mod texts;
mod url;

use std::sync::Arc;

use hooks::{HookRegistry, HookResult, KeyboardBuilder};
use teloxide::types::{InlineKeyboardButton, WebAppInfo};

use common::types::UserId;

use crate::{
    callback::Callback,
    config::{DirectLayout, DisplayMode, LegalDoc, LegalDocsConfig},
    keyboards::Keyboards,
    menus::Screen,
    payload::PayloadData,
    store::Store,
    ABOUT_VPN_HOOK,
};

pub use url::is_valid_url;

/// Web app buttons of the documents with valid urls, in configured order
pub(crate) fn document_buttons(docs: &[LegalDoc]) -> Vec<InlineKeyboardButton> {
    docs.iter()
        .filter_map(|doc| match url::parse_document_url(&doc.url) {
            Some(url) => Some(InlineKeyboardButton::web_app(
                doc.text.clone(),
                WebAppInfo { url },
            )),
            None => {
                log::error!("invalid url of legal document '{}': {}", doc.text, doc.url);
                None
            }
        })
        .collect()
}

/// Buttons the module adds to the "about service" menu
pub fn about_vpn_hook(config: &LegalDocsConfig) -> HookResult {
    if !config.enabled {
        return HookResult::None;
    }
    match config.display_mode {
        DisplayMode::Menu => HookResult::button(InlineKeyboardButton::callback(
            config.menu_button_text.clone(),
            Callback::LegalDocsMenu.to_payload(),
        )),
        DisplayMode::Direct => {
            let buttons = document_buttons(&config.documents);
            if buttons.is_empty() {
                return HookResult::None;
            }
            match config.direct_layout {
                DirectLayout::SameRow => HookResult::row(buttons),
                DirectLayout::SeparateRows => {
                    HookResult::Composite(buttons.into_iter().map(HookResult::button).collect())
                }
            }
        }
    }
}

pub(crate) fn menu_screen(config: &LegalDocsConfig) -> Screen {
    if !config.enabled {
        return Screen::with_back(texts::ERROR_MODULE_DISABLED, Callback::AboutVpn);
    }
    let buttons = document_buttons(&config.documents);
    if buttons.is_empty() {
        return Screen::with_back(texts::ERROR_NO_DOCUMENTS, Callback::AboutVpn);
    }
    Screen::new(
        texts::LEGAL_DOCS_MENU_TEXT,
        Keyboards::back(document_rows(buttons), Callback::AboutVpn),
    )
}

pub(crate) fn first_launch_screen(config: &LegalDocsConfig) -> Screen {
    let keyboard = document_rows(document_buttons(&config.documents))
        .row()
        .callback(texts::ACCEPT_DOCUMENTS_BUTTON, Callback::AcceptLegalDocs.to_payload());
    Screen::new(texts::FIRST_LAUNCH_LEGAL_MESSAGE, keyboard)
}

fn document_rows(buttons: Vec<InlineKeyboardButton>) -> KeyboardBuilder {
    let cap = buttons.len() + 1;
    buttons
        .into_iter()
        .fold(KeyboardBuilder::with_rows_capacity(cap), |kb, button| {
            kb.row().button(button)
        })
}

/// User without keys and without trial sees the documents before the main menu.
/// Lookup errors are logged and count as "not first"
pub(crate) async fn is_first_launch<S>(store: &S, config: &LegalDocsConfig, user_id: UserId) -> bool
where
    S: Store + ?Sized,
{
    if !config.enabled || !config.first_launch {
        return false;
    }
    let check = async {
        let key_count = store.key_count(user_id).await?;
        let trial_status = store.trial_status(user_id).await?;
        anyhow::Ok(key_count == 0 && trial_status == 0)
    };
    match check.await {
        Ok(first) => first,
        Err(e) => {
            log::error!("failed to check first launch of user {user_id}: {e}");
            false
        }
    }
}

pub fn register(registry: &mut HookRegistry, config: &LegalDocsConfig) {
    let config = Arc::new(config.clone());
    if config.enabled {
        let valid = document_buttons(&config.documents).len();
        log::info!(
            "legal docs module initialized, {valid} of {} documents valid",
            config.documents.len()
        );
    } else {
        log::info!("legal docs module disabled");
    }
    registry.register_fn(ABOUT_VPN_HOOK, move |_| Ok(about_vpn_hook(&config)));
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use hooks::HookContext;
    use teloxide::types::InlineKeyboardButton as Btn;

    use super::*;
    use crate::{
        store::{tests::record, KeyRecord, MemoryStore},
        texts::BACK,
    };

    fn doc(text: &str, url: &str) -> LegalDoc {
        LegalDoc {
            text: text.to_string(),
            url: url.to_string(),
        }
    }

    fn web_app(text: &str, url: &str) -> Btn {
        Btn::web_app(
            text,
            WebAppInfo {
                url: url.parse().unwrap(),
            },
        )
    }

    fn config(mode: DisplayMode, layout: DirectLayout) -> LegalDocsConfig {
        LegalDocsConfig {
            display_mode: mode,
            direct_layout: layout,
            documents: vec![
                doc("Terms", "https://example.com/terms.html"),
                doc("Broken", "ftp://example.com"),
                doc("Privacy", "https://example.com/privacy.html"),
            ],
            ..LegalDocsConfig::default()
        }
    }

    async fn invoke(config: &LegalDocsConfig) -> Vec<HookResult> {
        let mut registry = HookRegistry::new();
        register(&mut registry, config);
        registry
            .invoke(ABOUT_VPN_HOOK, HookContext::new().with("user_id", 1u64))
            .await
    }

    #[tokio::test]
    async fn test_menu_mode_single_button() {
        common::init_logger();

        for documents in [vec![], config(DisplayMode::Menu, DirectLayout::SameRow).documents] {
            let config = LegalDocsConfig {
                documents,
                ..LegalDocsConfig::default()
            };
            let results = invoke(&config).await;
            assert_eq!(
                results,
                vec![HookResult::button(Btn::callback(
                    texts::LEGAL_MENU_BUTTON_TEXT,
                    "legal_docs_menu"
                ))]
            );
        }
    }

    #[tokio::test]
    async fn test_direct_same_row() {
        common::init_logger();

        let results = invoke(&config(DisplayMode::Direct, DirectLayout::SameRow)).await;
        assert_eq!(
            results,
            vec![HookResult::row([
                web_app("Terms", "https://example.com/terms.html"),
                web_app("Privacy", "https://example.com/privacy.html"),
            ])]
        );
    }

    #[tokio::test]
    async fn test_direct_separate_rows() {
        common::init_logger();

        let results = invoke(&config(DisplayMode::Direct, DirectLayout::SeparateRows)).await;
        assert_eq!(
            results,
            vec![HookResult::Composite(vec![
                HookResult::button(web_app("Terms", "https://example.com/terms.html")),
                HookResult::button(web_app("Privacy", "https://example.com/privacy.html")),
            ])]
        );

        let kb = KeyboardBuilder::new().merge_hook_results(results);
        assert_eq!(kb.rows().len(), 2);
    }

    #[tokio::test]
    async fn test_disabled_or_no_valid_documents() {
        common::init_logger();

        let disabled = LegalDocsConfig {
            enabled: false,
            ..config(DisplayMode::Menu, DirectLayout::SameRow)
        };
        assert!(invoke(&disabled).await.is_empty());

        let broken = LegalDocsConfig {
            documents: vec![doc("Broken", "not a url")],
            ..config(DisplayMode::Direct, DirectLayout::SameRow)
        };
        assert!(invoke(&broken).await.is_empty());
    }

    #[test]
    fn test_menu_screen() {
        common::init_logger();

        let screen = menu_screen(&config(DisplayMode::Menu, DirectLayout::SameRow));
        similar_asserts::assert_eq!(
            screen.markup.map(|m| m.inline_keyboard),
            Some(vec![
                vec![web_app("Terms", "https://example.com/terms.html")],
                vec![web_app("Privacy", "https://example.com/privacy.html")],
                vec![Btn::callback(BACK, "about_vpn")],
            ])
        );

        let broken = LegalDocsConfig {
            documents: vec![doc("Broken", "not a url")],
            ..config(DisplayMode::Menu, DirectLayout::SameRow)
        };
        assert_eq!(
            menu_screen(&broken),
            Screen::with_back(texts::ERROR_NO_DOCUMENTS, Callback::AboutVpn)
        );

        let disabled = LegalDocsConfig {
            enabled: false,
            ..LegalDocsConfig::default()
        };
        assert_eq!(
            menu_screen(&disabled),
            Screen::with_back(texts::ERROR_MODULE_DISABLED, Callback::AboutVpn)
        );
    }

    #[test]
    fn test_first_launch_screen() {
        let screen = first_launch_screen(&config(DisplayMode::Menu, DirectLayout::SameRow));
        assert_eq!(screen.text, texts::FIRST_LAUNCH_LEGAL_MESSAGE);
        similar_asserts::assert_eq!(
            screen.markup.map(|m| m.inline_keyboard),
            Some(vec![
                vec![web_app("Terms", "https://example.com/terms.html")],
                vec![web_app("Privacy", "https://example.com/privacy.html")],
                vec![Btn::callback(texts::ACCEPT_DOCUMENTS_BUTTON, "accept_legal_docs")],
            ])
        );
    }

    struct FailingStore;

    #[async_trait]
    impl Store for FailingStore {
        async fn user_key(
            &self,
            _user_id: UserId,
            _key_name: &str,
        ) -> anyhow::Result<Option<KeyRecord>> {
            anyhow::bail!("db is down")
        }
        async fn user_keys(&self, _user_id: UserId) -> anyhow::Result<Vec<KeyRecord>> {
            anyhow::bail!("db is down")
        }
        async fn trial_status(&self, _user_id: UserId) -> anyhow::Result<u8> {
            anyhow::bail!("db is down")
        }
    }

    #[tokio::test]
    async fn test_first_launch_check() {
        common::init_logger();

        let store = MemoryStore::new(vec![record("k1", 1, None, None)], vec![2]);
        let config = LegalDocsConfig::default();

        assert!(!is_first_launch(&store, &config, UserId(1)).await);
        assert!(!is_first_launch(&store, &config, UserId(2)).await);
        assert!(is_first_launch(&store, &config, UserId(3)).await);
        assert!(!is_first_launch(&FailingStore, &config, UserId(3)).await);

        let off = LegalDocsConfig {
            first_launch: false,
            ..LegalDocsConfig::default()
        };
        assert!(!is_first_launch(&store, &off, UserId(3)).await);
    }
}
