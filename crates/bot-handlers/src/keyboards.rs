use hooks::KeyboardBuilder;

use crate::{callback::Callback, payload::PayloadData, store::KeyRecord, texts};

pub(crate) struct Keyboards;

impl Keyboards {
    pub(crate) fn main_menu() -> KeyboardBuilder {
        KeyboardBuilder::with_rows_capacity(2)
            .row()
            .callback(texts::MY_KEYS_BUTTON, Callback::Keys.to_payload())
            .row()
            .callback(texts::ABOUT_VPN_BUTTON, Callback::AboutVpn.to_payload())
    }
    /// Base of "about service" menu, hook buttons go after it
    pub(crate) fn about_vpn() -> KeyboardBuilder {
        KeyboardBuilder::new()
    }
    pub(crate) fn keys(keys: &[KeyRecord]) -> KeyboardBuilder {
        keys.iter()
            .fold(KeyboardBuilder::with_rows_capacity(keys.len() + 1), |kb, key| {
                kb.row()
                    .callback(format!("🔑 {}", key.name), Callback::view_key(&key.name).to_payload())
            })
    }
    /// Base of key menu, hook buttons go after it
    pub(crate) fn key_view(key_name: &str) -> KeyboardBuilder {
        KeyboardBuilder::with_rows_capacity(2)
            .row()
            .callback(texts::CONNECT_TV_BUTTON, Callback::connect_tv(key_name).to_payload())
    }
    /// Trailing row with a single "back" button
    pub(crate) fn back(kb: KeyboardBuilder, to: Callback) -> KeyboardBuilder {
        kb.row().callback(texts::BACK, to.to_payload())
    }
}
