mod bot_callback;
mod bot_messages;
mod callback;
mod commands;
pub mod config;
pub mod happ_tv;
mod keyboards;
pub mod legal_docs;
mod menus;
mod payload;
pub mod store;
mod texts;
pub mod utils;

use std::sync::Arc;

use hooks::HookRegistry;
use teloxide::{dispatching::UpdateHandler, prelude::*, RequestError};

use config::{LegalDocsConfig, ModulesConfig};
use happ_tv::HappTv;
use store::SharedStore;

// callback data: {flag}|{args}
const MAIN_MENU_FLAG: &str = "main_menu";
const ABOUT_VPN_FLAG: &str = "about_vpn";
const KEYS_FLAG: &str = "keys";
const VIEW_KEY_FLAG: &str = "view_key";
const CONNECT_TV_FLAG: &str = "connect_tv";
const HAPP_TV_FLAG: &str = "happ_tv";
const HAPP_TV_CANCEL_FLAG: &str = "happ_tv_cancel";
const LEGAL_DOCS_MENU_FLAG: &str = "legal_docs_menu";
const ACCEPT_LEGAL_DOCS_FLAG: &str = "accept_legal_docs";

/// Hook of the key menu, context: `key_name`, `user_id`
pub const VIEW_KEY_MENU_HOOK: &str = "view_key_menu";
/// Hook of the "about service" menu, context: `user_id`
pub const ABOUT_VPN_HOOK: &str = "about_vpn";

/// Picture of the key menu, shown when the file exists
pub const KEY_VIEW_IMAGE: &str = "img/pic_view.jpg";

pub const KEY_NAME_ARG: &str = "key_name";
pub const USER_ID_ARG: &str = "user_id";

pub use bot_callback::callback_handler;
pub use bot_messages::{command_handler, message_handler};
pub use commands::Command;
pub use payload::{PayloadLayout, PayloadParseError};

/// Dependencies of every handler
#[derive(Clone)]
pub struct BotState {
    registry: Arc<HookRegistry>,
    store: SharedStore,
    happ_tv: Option<HappTv>,
    legal_docs: Arc<LegalDocsConfig>,
}

impl BotState {
    pub fn new(
        registry: Arc<HookRegistry>,
        store: SharedStore,
        config: &ModulesConfig,
    ) -> Result<Self, reqwest::Error> {
        let happ_tv = if config.happ_tv.enabled {
            Some(HappTv::from_config(store.clone(), &config.happ_tv)?)
        } else {
            None
        };
        Ok(Self {
            registry,
            store,
            happ_tv,
            legal_docs: Arc::new(config.legal_docs.clone()),
        })
    }
}

/// Register hook callbacks of every module
pub fn register_hooks(registry: &mut HookRegistry, config: &ModulesConfig) {
    happ_tv::register(registry, &config.happ_tv);
    legal_docs::register(registry, &config.legal_docs);
}

/// Dispatcher tree, expects [`BotState`] in dependencies
pub fn schema() -> UpdateHandler<RequestError> {
    let commands = dptree::entry()
        .filter_command::<Command>()
        .branch(
            dptree::case![Command::Start]
                .filter_async(legal_docs::handlers::is_first_launch)
                .endpoint(legal_docs::handlers::show_first_launch),
        )
        .endpoint(command_handler);

    let messages = Update::filter_message()
        .branch(
            dptree::filter(happ_tv::handlers::is_code_message)
                .endpoint(happ_tv::handlers::code_entered),
        )
        .branch(commands)
        .branch(dptree::endpoint(message_handler));

    dptree::entry()
        .branch(messages)
        .branch(Update::filter_callback_query().endpoint(callback_handler))
}
