use log::{kv::Key, Level, LevelFilter, Metadata, Record};
use simplelog::SharedLogger;
use tokio::sync::mpsc::Sender;

use crate::handlers::tg_logs::LogMessage;

/// Records with `tg = true` are forwarded regardless of level
const TG_KEY: &str = "tg";

/// Sends errors and records tagged with `tg = true` to the log chat
#[derive(Debug)]
pub(crate) struct TgLogger {
    sender: Sender<LogMessage>,
    config: Config,
}

impl TgLogger {
    pub(crate) fn new(sender: Sender<LogMessage>, config: Config) -> Box<Self> {
        Box::new(Self { sender, config })
    }

    fn message(&self, record: &Record) -> Option<LogMessage> {
        let msg = if record.level() <= Level::Error {
            LogMessage::log_error(
                record.args().to_string(),
                record.target(),
                record.file(),
                record.line(),
            )
        } else if is_tagged(record) {
            LogMessage::with_level(&record.args().to_string(), record.level())
        } else {
            return None;
        };
        (!self.config.is_ignored(msg.text())).then_some(msg)
    }
}

fn is_tagged(record: &Record) -> bool {
    record
        .key_values()
        .get(Key::from_str(TG_KEY))
        .and_then(|v| v.to_bool())
        .unwrap_or(false)
}

impl log::Log for TgLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(msg) = self.message(record) {
            // never blocks, the record is dropped when the channel is full
            if let Err(e) = self.sender.try_send(msg) {
                eprintln!("failed to forward log to tg: {e}");
            }
        }
    }

    fn flush(&self) {}
}

impl SharedLogger for TgLogger {
    fn level(&self) -> LevelFilter {
        LevelFilter::Info
    }

    fn config(&self) -> Option<&simplelog::Config> {
        None
    }

    fn as_log(self: Box<Self>) -> Box<dyn log::Log> {
        Box::new(*self)
    }
}

#[derive(Debug, Default, Clone)]
pub(crate) struct Config {
    /// Substrings of messages that are not forwarded
    ignore: Vec<String>,
}

impl Config {
    fn is_ignored(&self, text: &str) -> bool {
        self.ignore.iter().any(|s| text.contains(s.as_str()))
    }
}

#[derive(Debug, Default)]
pub(crate) struct ConfigBuilder(Config);

impl ConfigBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }
    pub(crate) fn add_ignore(mut self, s: impl Into<String>) -> Self {
        self.0.ignore.push(s.into());
        self
    }
    pub(crate) fn build(self) -> Config {
        self.0
    }
}
