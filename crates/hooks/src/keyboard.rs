use reqwest::Url;
use serde_json::Value;
use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardButtonKind, InlineKeyboardMarkup, ReplyMarkup, WebAppInfo,
};

use crate::{ButtonRow, HookResult, Removal};

/// Row-based inline keyboard builder.
///
/// Buttons are added to the row opened by the last [`KeyboardBuilder::row`]
/// call. Adding a button before any row is opened makes the builder invalid,
/// and an invalid builder renders as an empty keyboard.
#[derive(Debug, Default, Clone)]
pub struct KeyboardBuilder {
    keys: Vec<ButtonRow>,
    current_row: usize,
    state: KeyboardBuilderState,
}

impl KeyboardBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_rows_capacity(cap: usize) -> Self {
        Self {
            keys: Vec::with_capacity(cap),
            ..Self::default()
        }
    }
    pub fn row(mut self) -> Self {
        if !self.keys.is_empty() {
            self.current_row = self.keys.len();
        }
        self.keys.push(vec![]);
        self
    }
    pub fn callback<T, D>(self, text: T, data: D) -> Self
    where
        T: Into<String>,
        D: Into<String>,
    {
        self.button(InlineKeyboardButton::callback(text, data))
    }
    pub fn url<T: Into<String>>(self, text: T, url: Url) -> Self {
        self.button(InlineKeyboardButton::url(text, url))
    }
    pub fn web_app<T: Into<String>>(self, text: T, url: Url) -> Self {
        self.button(InlineKeyboardButton::web_app(text, WebAppInfo { url }))
    }
    /// Add a prepared button to the current row
    pub fn button(mut self, button: InlineKeyboardButton) -> Self {
        if self.keys.len() <= self.current_row {
            log::error!(
                "index {} out of bounds for new button ({}, {:?}) for keyboard",
                self.current_row,
                button.text,
                button.kind,
            );
            self.state = KeyboardBuilderState::Invalid;
            return self;
        }
        self.keys[self.current_row].push(button);
        self
    }
    /// Append a complete row, empty rows are ignored
    pub fn push_row(mut self, row: ButtonRow) -> Self {
        if row.is_empty() {
            return self;
        }
        self.keys.push(row);
        self.current_row = self.keys.len() - 1;
        self
    }
    /// Remove buttons matched by `removal`, dropping rows left empty.
    /// Returns the number of removed buttons
    pub fn remove_matching(&mut self, removal: &Removal) -> usize {
        let mut removed = 0;
        self.keys.retain_mut(|row| {
            let before = row.len();
            row.retain(|b| !button_id(b).is_some_and(|id| removal.matches(id)));
            let row_removed = before - row.len();
            removed += row_removed;
            row_removed == 0 || !row.is_empty()
        });
        self.current_row = self.keys.len().saturating_sub(1);
        removed
    }
    pub fn rows(&self) -> &[ButtonRow] {
        &self.keys
    }
    pub fn is_valid(&self) -> bool {
        matches!(self.state, KeyboardBuilderState::Valid)
    }

    /// Fold results of one hook invocation into the keyboard, in order.
    ///
    /// Malformed results are logged and skipped.
    pub fn merge_hook_results<I>(self, results: I) -> Self
    where
        I: IntoIterator<Item = HookResult>,
    {
        results.into_iter().fold(self, Self::apply_hook_result)
    }
    /// Same as [`KeyboardBuilder::merge_hook_results`] for results in their
    /// untyped JSON shape
    pub fn merge_raw_hook_results<I>(self, results: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        results
            .into_iter()
            .filter_map(|value| match HookResult::try_from(value) {
                Ok(result) => Some(result),
                Err(e) => {
                    log::error!("skipping hook result: {e}");
                    None
                }
            })
            .fold(self, Self::apply_hook_result)
    }
    fn apply_hook_result(mut self, result: HookResult) -> Self {
        if result.is_empty() {
            return self;
        }
        match result {
            HookResult::None => self,
            HookResult::Add(row) => self.push_row(row),
            HookResult::Remove(removal) => {
                let removed = self.remove_matching(&removal);
                log::debug!("hook removed {removed} buttons");
                self
            }
            HookResult::Composite(items) => {
                if items.iter().any(|i| matches!(i, HookResult::Composite(_))) {
                    log::error!("skipping malformed hook result: nested composite");
                    return self;
                }
                let (removals, additions): (Vec<_>, Vec<_>) = items
                    .into_iter()
                    .partition(|i| matches!(i, HookResult::Remove(_)));
                removals
                    .into_iter()
                    .chain(additions)
                    .fold(self, Self::apply_hook_result)
            }
        }
    }

    pub fn build(self) -> InlineKeyboardMarkup {
        self.into()
    }
}

/// Identifier used to match buttons for removal: callback data, or the url
/// for link and web app buttons
pub fn button_id(button: &InlineKeyboardButton) -> Option<&str> {
    match &button.kind {
        InlineKeyboardButtonKind::CallbackData(data) => Some(data.as_str()),
        InlineKeyboardButtonKind::Url(url) => Some(url.as_str()),
        InlineKeyboardButtonKind::WebApp(info) => Some(info.url.as_str()),
        _ => None,
    }
}

/// Insert buttons collected from hook callbacks into an existing keyboard
pub fn insert_hook_buttons<I>(keyboard: KeyboardBuilder, results: I) -> KeyboardBuilder
where
    I: IntoIterator<Item = HookResult>,
{
    keyboard.merge_hook_results(results)
}

impl From<KeyboardBuilder> for InlineKeyboardMarkup {
    fn from(mut value: KeyboardBuilder) -> Self {
        if !value.is_valid() {
            log::error!("failed to build inline keyboard, dropping");
            value.keys = vec![];
        }
        Self::new(value.keys.into_iter().filter(|row| !row.is_empty()))
    }
}

impl From<KeyboardBuilder> for ReplyMarkup {
    fn from(value: KeyboardBuilder) -> Self {
        Self::InlineKeyboard(value.into())
    }
}

#[derive(Debug, Default, Clone, Copy)]
enum KeyboardBuilderState {
    #[default]
    Valid,
    Invalid,
}
