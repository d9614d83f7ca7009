use std::{io::ErrorKind, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

use bot_handlers::{config::ModulesConfig, store::KeyRecord};

/// Modules settings plus the demo store contents
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    #[serde(flatten)]
    pub(crate) modules: ModulesConfig,
    pub(crate) keys: Vec<KeyRecord>,
    pub(crate) trial_users: Vec<u64>,
}

impl Config {
    /// Missing file means defaults
    pub(crate) fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!("config {} not found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e).with_context(|| format!("failed to read {}", path.display())),
        };
        Self::parse(&s).with_context(|| format!("failed to parse {}", path.display()))
    }
    fn parse(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use bot_handlers::config::DisplayMode;

    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
            trial_users = [3]

            [happ_tv]
            timeout_secs = 5

            [legal_docs]
            display_mode = "direct"

            [[legal_docs.documents]]
            text = "Terms"
            url = "https://example.com/terms.html"

            [[keys]]
            name = "k1"
            owner = 1
            key = "vless://key"

            [[keys]]
            name = "k2"
            owner = 1
            remnawave_link = "https://panel.example.com/sub/k2"
            "#,
        )
        .unwrap();

        assert_eq!(config.modules.happ_tv.timeout_secs, 5);
        assert!(config.modules.happ_tv.enabled);
        assert_eq!(config.modules.legal_docs.display_mode, DisplayMode::Direct);
        assert_eq!(config.modules.legal_docs.documents.len(), 1);
        assert_eq!(config.keys.len(), 2);
        assert_eq!(config.keys[1].subscription_link(), Some("https://panel.example.com/sub/k2"));
        assert_eq!(config.trial_users, vec![3]);
    }

    #[test]
    fn test_missing_file_is_default() {
        common::init_logger();

        let config = Config::load("does-not-exist.toml").unwrap();
        assert!(config.keys.is_empty());
        assert!(config.modules.legal_docs.enabled);
    }
}
