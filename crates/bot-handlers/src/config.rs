//! Settings of the feature modules, read from the `[happ_tv]` and
//! `[legal_docs]` tables of the modules config file.

use std::{path::Path, time::Duration};

use serde::Deserialize;

use crate::legal_docs::texts::LEGAL_MENU_BUTTON_TEXT;

const HAPP_TV_ENDPOINT: &str = "https://check.happ.su/sendtv/";
const HAPP_TV_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModulesConfig {
    pub happ_tv: HappTvConfig,
    pub legal_docs: LegalDocsConfig,
}

impl ModulesConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HappTvConfig {
    pub enabled: bool,
    /// Activation code is appended to this url
    pub endpoint: String,
    /// 0 falls back to the default
    pub timeout_secs: u64,
}

impl HappTvConfig {
    pub fn timeout(&self) -> Duration {
        if self.timeout_secs == 0 {
            log::warn!("happ_tv.timeout_secs is 0, using {HAPP_TV_TIMEOUT_SECS}s");
            return Duration::from_secs(HAPP_TV_TIMEOUT_SECS);
        }
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HappTvConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: HAPP_TV_ENDPOINT.to_string(),
            timeout_secs: HAPP_TV_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LegalDocsConfig {
    pub enabled: bool,
    pub display_mode: DisplayMode,
    /// Only used in [`DisplayMode::Direct`]
    pub direct_layout: DirectLayout,
    /// Show documents on the first /start of a user without keys and trial
    pub first_launch: bool,
    pub menu_button_text: String,
    pub documents: Vec<LegalDoc>,
}

impl Default for LegalDocsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            display_mode: DisplayMode::default(),
            direct_layout: DirectLayout::default(),
            first_launch: true,
            menu_button_text: LEGAL_MENU_BUTTON_TEXT.to_string(),
            documents: vec![],
        }
    }
}

/// How documents appear in the "about service" menu
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// One button leading to the documents submenu
    #[default]
    Menu,
    /// Document buttons right in the menu
    Direct,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectLayout {
    SameRow,
    #[default]
    SeparateRows,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LegalDoc {
    pub text: String,
    pub url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ModulesConfig::from_toml_str("").unwrap();
        assert!(config.happ_tv.enabled);
        assert_eq!(config.happ_tv.endpoint, HAPP_TV_ENDPOINT);
        assert_eq!(config.happ_tv.timeout(), Duration::from_secs(15));
        assert!(config.legal_docs.enabled);
        assert_eq!(config.legal_docs.display_mode, DisplayMode::Menu);
        assert_eq!(config.legal_docs.direct_layout, DirectLayout::SeparateRows);
        assert!(config.legal_docs.documents.is_empty());
    }

    #[test]
    fn test_parse() {
        let config = ModulesConfig::from_toml_str(
            r#"
            [happ_tv]
            enabled = false

            [legal_docs]
            display_mode = "direct"
            direct_layout = "same_row"

            [[legal_docs.documents]]
            text = "Terms"
            url = "https://example.com/terms.html"

            [[legal_docs.documents]]
            text = "Privacy"
            url = "https://example.com/privacy.html"
            "#,
        )
        .unwrap();

        assert!(!config.happ_tv.enabled);
        assert_eq!(config.happ_tv.timeout_secs, HAPP_TV_TIMEOUT_SECS);
        assert_eq!(config.legal_docs.display_mode, DisplayMode::Direct);
        assert_eq!(config.legal_docs.direct_layout, DirectLayout::SameRow);
        assert_eq!(
            config
                .legal_docs
                .documents
                .iter()
                .map(|d| d.text.as_str())
                .collect::<Vec<_>>(),
            ["Terms", "Privacy"]
        );
    }

    #[test]
    fn test_zero_timeout_uses_default() {
        common::init_logger();

        let config = ModulesConfig::from_toml_str("[happ_tv]\ntimeout_secs = 0").unwrap();
        assert_eq!(config.happ_tv.timeout(), Duration::from_secs(HAPP_TV_TIMEOUT_SECS));

        let config = ModulesConfig::from_toml_str("[happ_tv]\ntimeout_secs = 3").unwrap();
        assert_eq!(config.happ_tv.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(ModulesConfig::from_toml_str("[legal_docs]\ndisplay_mode = \"popup\"").is_err());
    }
}
