use std::fmt::Display;

use log::Level;
use teloxide::{
    payloads::SendMessageSetters,
    requests::Requester,
    types::{ChatId, ParseMode},
    utils::markdown::{code_block_with_lang, escape},
    Bot,
};
use tokio::sync::mpsc::Receiver;

use common::LogError;

/// Forward log records to the log chat until the channel is closed
pub(crate) async fn start_tg_logs_job(bot: Bot, chat_id: ChatId, mut rx: Receiver<LogMessage>) {
    log::debug!("starting tg logs job");
    while let Some(msg) = rx.recv().await {
        bot.send_message(chat_id, msg.to_string())
            .parse_mode(ParseMode::MarkdownV2)
            .await
            .log_error_msg("failed to send log");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LogMessage {
    Code(String),
    Markdown(String),
}

impl LogMessage {
    pub(crate) fn log_error(
        s: impl Into<String>,
        target: &str,
        file: Option<&str>,
        line: Option<u32>,
    ) -> Self {
        let mut msg = format!("[ERROR] {}\n        at {target}", s.into());
        if let Some(file) = file {
            msg += &format!(": {file}");
            if let Some(line) = line {
                msg += &format!(":{line}");
            }
        }
        Self::Code(msg)
    }
    /// Plain text, escaped for telegram's markdown
    pub(crate) fn with_level(s: &str, level: Level) -> Self {
        Self::Markdown(format!("{}: {}", level_to_string(level), escape(s)))
    }
    pub(crate) fn text(&self) -> &str {
        match self {
            Self::Code(s) | Self::Markdown(s) => s,
        }
    }
}

impl Display for LogMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogMessage::Code(s) => code_block_with_lang(s, "log").fmt(f),
            LogMessage::Markdown(s) => s.fmt(f),
        }
    }
}

fn level_to_string(level: Level) -> &'static str {
    match level {
        Level::Error => "Error",
        Level::Warn => "Warning",
        Level::Info => "Info",
        Level::Debug => "Debug",
        Level::Trace => "Trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_message_format() {
        let msg = LogMessage::log_error("boom", "bot_handlers", Some("src/lib.rs"), Some(7));
        assert_eq!(
            msg.text(),
            "[ERROR] boom\n        at bot_handlers: src/lib.rs:7"
        );
        assert_eq!(
            msg.to_string(),
            "```log\n[ERROR] boom\n        at bot_handlers: src/lib.rs:7\n```"
        );

        let msg = LogMessage::with_level("user 1 accepted.", Level::Info);
        assert_eq!(msg.to_string(), "Info: user 1 accepted\\.");
    }
}
