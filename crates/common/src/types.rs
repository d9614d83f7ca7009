use teloxide::types::{ChatId as TgChatId, Recipient, UserId as TgUserId};

pub type Id = i64;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub u64);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Scope of a multi-step interaction: one user in one chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversationKey {
    pub chat_id: ChatId,
    pub user_id: UserId,
}

impl ConversationKey {
    pub fn new(chat_id: impl Into<ChatId>, user_id: impl Into<UserId>) -> Self {
        Self {
            chat_id: chat_id.into(),
            user_id: user_id.into(),
        }
    }
}

macro_rules! cast {
    ($($from:ty => $to:ty : $value:ident => $convert:expr),* $(,)?) => {
        $(impl From<$from> for $to {
            fn from($value: $from) -> Self {
                $convert
            }
        })*
    };
}

cast!(
    i64 => ChatId: v => Self(v),
    u64 => UserId: v => Self(v),

    ChatId => Recipient: v => Recipient::Id(v.into()),
    UserId => Recipient: v => Recipient::Id(v.into()),

    ChatId => TgChatId: v => Self(v.0),
    TgChatId => ChatId: v => Self(v.0),

    UserId => TgUserId: v => Self(v.0),
    TgUserId => UserId: v => Self(v.0),

    UserId => TgChatId: v => Self(v.0 as _),

    ChatId => Id: v => v.0,
);

/// Simple [`std::fmt::Display`] implementation
macro_rules! display {
    ($($from:ty : $self:ident => $value:expr),* $(,)?) => {
        $(impl ::std::fmt::Display for $from {
            fn fmt(&$self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&$value, f)
            }
        })*
    };
}

display!(
    ChatId: self => self.0,
    UserId: self => self.0,
);

impl std::fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.chat_id, self.user_id)
    }
}
