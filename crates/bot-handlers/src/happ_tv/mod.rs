//! Happ TV: send a subscription to the TV app by the code it shows.
//!
//! Replaces the host "connect TV" button of the key menu, asks for the code
//! and posts the subscription link to the Happ activation api.

mod client;
mod flow;
pub(crate) mod handlers;
mod texts;

use std::sync::Arc;

use hooks::{HookContext, HookError, HookRegistry, HookResult, KeyboardBuilder};
use teloxide::types::InlineKeyboardButton;

use common::types::{ConversationKey, UserId};

use crate::{
    callback::Callback, config::HappTvConfig, keyboards::Keyboards, menus::Screen,
    payload::PayloadData, store::SharedStore, KEY_NAME_ARG, VIEW_KEY_MENU_HOOK,
};

pub use client::{ActivationError, HappClient, TvActivator};
pub use flow::{transition, ActivationCode, FlowAction, FlowEvent, FlowState, HappTvFlows};

/// Module state shared by the handlers
#[derive(Clone)]
pub struct HappTv {
    flows: HappTvFlows,
    store: SharedStore,
    activator: Arc<dyn TvActivator>,
}

impl HappTv {
    pub fn new(store: SharedStore, activator: Arc<dyn TvActivator>) -> Self {
        Self {
            flows: HappTvFlows::new(),
            store,
            activator,
        }
    }
    pub fn from_config(store: SharedStore, config: &HappTvConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(store, Arc::new(HappClient::new(config)?)))
    }

    pub(crate) fn is_waiting(&self, conversation: &ConversationKey) -> bool {
        self.flows.is_waiting(conversation)
    }

    /// User pressed the module button in the key menu
    pub(crate) fn start(&self, conversation: ConversationKey, key_name: &str) -> Screen {
        let event = FlowEvent::Start {
            key_name: key_name.to_string(),
        };
        match self.flows.apply(conversation, event) {
            FlowAction::PromptCode { key_name } => code_screen(texts::HAPP_TV_CODE_REQUEST, &key_name),
            action => unexpected(action, key_name),
        }
    }

    /// Text from the user. None if the conversation is not waiting for a code
    pub(crate) async fn code_entered(
        &self,
        conversation: ConversationKey,
        text: &str,
    ) -> Option<Screen> {
        let action = self
            .flows
            .apply(conversation, FlowEvent::CodeEntered(text.to_string()));
        let screen = match action {
            FlowAction::Ignore => return None,
            FlowAction::RejectCode { key_name } => {
                code_screen(texts::HAPP_TV_INVALID_CODE, &key_name)
            }
            FlowAction::Activate { key_name, code } => {
                let text = if self.activate(conversation.user_id, &key_name, &code).await {
                    texts::HAPP_TV_SUCCESS
                } else {
                    texts::HAPP_TV_ERROR
                };
                code_screen(text, &key_name)
            }
            action @ (FlowAction::PromptCode { .. } | FlowAction::ShowKey { .. }) => {
                log::error!("unexpected happ tv action on code: {action:?}");
                return None;
            }
        };
        Some(screen)
    }

    /// Leave the flow, caller shows the key menu again
    pub(crate) fn cancel(&self, conversation: ConversationKey, key_name: &str) {
        let event = FlowEvent::Cancel {
            key_name: key_name.to_string(),
        };
        self.flows.apply(conversation, event);
    }

    async fn activate(&self, user_id: UserId, key_name: &str, code: &ActivationCode) -> bool {
        let record = match self.store.user_key(user_id, key_name).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                log::error!("happ tv: key {key_name} of user {user_id} not found");
                return false;
            }
            Err(e) => {
                log::error!("happ tv: failed to get key {key_name} of user {user_id}: {e}");
                return false;
            }
        };
        let Some(link) = record.subscription_link() else {
            log::error!("happ tv: key {key_name} has no subscription link");
            return false;
        };

        match self.activator.activate(code, link).await {
            Ok(()) => {
                log::info!("happ tv activated for key {key_name}");
                true
            }
            Err(e) => {
                log::error!("happ tv: {e}");
                false
            }
        }
    }
}

fn code_screen(text: &str, key_name: &str) -> Screen {
    Screen::new(
        text,
        Keyboards::back(KeyboardBuilder::new(), Callback::happ_tv_cancel(key_name)),
    )
}

fn unexpected(action: FlowAction, key_name: &str) -> Screen {
    log::error!("unexpected happ tv action: {action:?}");
    code_screen(texts::HAPP_TV_ERROR, key_name)
}

/// Swap the host "connect TV" button for the Happ TV one
pub(crate) fn view_key_menu_hook(ctx: &HookContext) -> Result<HookResult, HookError> {
    let key_name = ctx.require_str(KEY_NAME_ARG)?;
    let button = InlineKeyboardButton::callback(
        texts::HAPP_TV_BUTTON,
        Callback::happ_tv(key_name).to_payload(),
    );
    Ok(HookResult::remove([Callback::connect_tv(key_name).to_payload()])
        .and(HookResult::button(button)))
}

pub fn register(registry: &mut HookRegistry, config: &HappTvConfig) {
    if !config.enabled {
        log::info!("happ tv module disabled");
        return;
    }
    registry.register_fn(VIEW_KEY_MENU_HOOK, view_key_menu_hook);
    log::info!("happ tv module initialized");
}
