use std::path::Path;

use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{InlineKeyboardMarkup, InputFile, MessageId},
    ApiError, RequestError,
};

/// Message operations needed to present menus
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn edit_text(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        text: &str,
        markup: Option<InlineKeyboardMarkup>,
    ) -> Result<(), RequestError>;
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        markup: Option<InlineKeyboardMarkup>,
    ) -> Result<MessageId, RequestError>;
    async fn edit_caption(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        caption: &str,
        markup: Option<InlineKeyboardMarkup>,
    ) -> Result<(), RequestError>;
    async fn send_photo(
        &self,
        chat_id: ChatId,
        photo: &Path,
        caption: &str,
        markup: Option<InlineKeyboardMarkup>,
    ) -> Result<MessageId, RequestError>;
    async fn delete(&self, chat_id: ChatId, message_id: MessageId) -> Result<(), RequestError>;
}

#[async_trait]
impl MessageSink for Bot {
    async fn edit_text(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        text: &str,
        markup: Option<InlineKeyboardMarkup>,
    ) -> Result<(), RequestError> {
        let mut req = self.edit_message_text(chat_id, message_id, text);
        if let Some(markup) = markup {
            req = req.reply_markup(markup);
        }
        req.await.map(|_| ())
    }
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        markup: Option<InlineKeyboardMarkup>,
    ) -> Result<MessageId, RequestError> {
        let mut req = self.send_message(chat_id, text);
        if let Some(markup) = markup {
            req = req.reply_markup(markup);
        }
        req.await.map(|msg| msg.id)
    }
    async fn edit_caption(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        caption: &str,
        markup: Option<InlineKeyboardMarkup>,
    ) -> Result<(), RequestError> {
        let mut req = self.edit_message_caption(chat_id, message_id).caption(caption);
        if let Some(markup) = markup {
            req = req.reply_markup(markup);
        }
        req.await.map(|_| ())
    }
    async fn send_photo(
        &self,
        chat_id: ChatId,
        photo: &Path,
        caption: &str,
        markup: Option<InlineKeyboardMarkup>,
    ) -> Result<MessageId, RequestError> {
        let mut req = Requester::send_photo(self, chat_id, InputFile::file(photo)).caption(caption);
        if let Some(markup) = markup {
            req = req.reply_markup(markup);
        }
        req.await.map(|msg| msg.id)
    }
    async fn delete(&self, chat_id: ChatId, message_id: MessageId) -> Result<(), RequestError> {
        self.delete_message(chat_id, message_id).await.map(|_| ())
    }
}

/// Where to show a menu: over an existing message, or as a new one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTarget {
    pub chat_id: ChatId,
    pub message_id: Option<MessageId>,
    /// Target message is a photo, its text is a caption
    pub has_photo: bool,
}

impl MessageTarget {
    pub fn new(chat_id: ChatId, message_id: Option<MessageId>) -> Self {
        Self {
            chat_id,
            message_id,
            has_photo: false,
        }
    }
    pub fn message(msg: &Message) -> Self {
        Self {
            has_photo: msg.photo().is_some(),
            ..Self::new(msg.chat.id, Some(msg.id))
        }
    }
    /// Message the callback button was attached to, or the user's private
    /// chat when the message is too old to be accessed
    pub fn callback(q: &CallbackQuery) -> Self {
        match q.regular_message() {
            Some(msg) => Self::message(msg),
            None => Self::new(q.from.id.into(), None),
        }
    }
}

/// Show `text` in place of the target message.
///
/// Edits the message when possible. Otherwise sends a new one and deletes the
/// old, ignoring a failed delete. Returns id of the message showing the text,
/// or the target's id if nothing could be sent.
///
/// With an existing `photo` file the text becomes its caption: a photo
/// message gets its caption edited, any other message is replaced by the
/// photo. If that fails the text alone is shown.
pub async fn edit_or_send_message<S>(
    sink: &S,
    target: MessageTarget,
    text: &str,
    markup: Option<InlineKeyboardMarkup>,
    photo: Option<&Path>,
) -> Option<MessageId>
where
    S: MessageSink + ?Sized,
{
    if let Some(photo) = photo.filter(|p| p.exists()) {
        match show_photo(sink, target, photo, text, markup.clone()).await {
            Ok(id) => return Some(id),
            Err(e) => log::debug!(
                "failed to show photo {} in chat {}, sending text: {e}",
                photo.display(),
                target.chat_id.0
            ),
        }
    }

    let chat_id = target.chat_id;

    if let Some(message_id) = target.message_id {
        match sink.edit_text(chat_id, message_id, text, markup.clone()).await {
            Ok(()) | Err(RequestError::Api(ApiError::MessageNotModified)) => {
                return Some(message_id)
            }
            Err(e) => log::debug!(
                "failed to edit message {} in chat {}, sending new: {e}",
                message_id.0,
                chat_id.0
            ),
        }
    }

    match sink.send_text(chat_id, text, markup).await {
        Ok(new_id) => {
            delete_replaced(sink, target).await;
            Some(new_id)
        }
        Err(e) => {
            log::error!("failed to send message to chat {}: {e}", chat_id.0);
            target.message_id
        }
    }
}

async fn show_photo<S>(
    sink: &S,
    target: MessageTarget,
    photo: &Path,
    caption: &str,
    markup: Option<InlineKeyboardMarkup>,
) -> Result<MessageId, RequestError>
where
    S: MessageSink + ?Sized,
{
    if let (Some(message_id), true) = (target.message_id, target.has_photo) {
        return match sink.edit_caption(target.chat_id, message_id, caption, markup).await {
            Ok(()) | Err(RequestError::Api(ApiError::MessageNotModified)) => Ok(message_id),
            Err(e) => Err(e),
        };
    }
    let new_id = sink.send_photo(target.chat_id, photo, caption, markup).await?;
    delete_replaced(sink, target).await;
    Ok(new_id)
}

async fn delete_replaced<S>(sink: &S, target: MessageTarget)
where
    S: MessageSink + ?Sized,
{
    let Some(old_id) = target.message_id else {
        return;
    };
    if let Err(e) = sink.delete(target.chat_id, old_id).await {
        log::debug!("failed to delete message {} in chat {}: {e}", old_id.0, target.chat_id.0);
    }
}
