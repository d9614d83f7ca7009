use std::sync::LazyLock;

const DEFAULT_CONFIG_PATH: &str = "modules.toml";

static DOTENV: LazyLock<()> = LazyLock::new(|| {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("failed to read .env: {e}");
        }
    }
});

fn var(name: &str) -> Option<String> {
    LazyLock::force(&DOTENV);
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

pub(crate) static BOT_TOKEN: LazyLock<Option<String>> = LazyLock::new(|| var("BOT_TOKEN"));

pub fn bot_token() -> Option<&'static str> {
    BOT_TOKEN.as_deref()
}

pub(crate) static LOG_CHAT_ID: LazyLock<Option<i64>> = LazyLock::new(|| {
    var("LOG_CHAT_ID").and_then(|s| match s.parse() {
        Ok(id) => Some(id),
        Err(e) => {
            eprintln!("invalid LOG_CHAT_ID '{s}': {e}");
            None
        }
    })
});

/// Chat for forwarding error logs
pub fn log_chat_id() -> Option<i64> {
    *LOG_CHAT_ID
}

pub fn config_path() -> String {
    var("MODULES_CONFIG").unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

pub fn is_prod_env() -> bool {
    var("BOT_PROD").is_some_and(|s| s == "1" || s == "true")
}
