use crate::{
    payload::{PayloadData, PayloadLayout, PayloadParseError, SEP},
    ABOUT_VPN_FLAG, ACCEPT_LEGAL_DOCS_FLAG, CONNECT_TV_FLAG, HAPP_TV_CANCEL_FLAG, HAPP_TV_FLAG,
    KEYS_FLAG, LEGAL_DOCS_MENU_FLAG, MAIN_MENU_FLAG, VIEW_KEY_FLAG,
};

/// {flag}|{key_name}, key name is taken verbatim
const KEY_LAYOUT: PayloadLayout = PayloadLayout::new(2, Some(1));

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Callback {
    MainMenu,
    AboutVpn,
    Keys,
    ViewKey { key_name: String },
    ConnectTv { key_name: String },
    HappTv { key_name: String },
    HappTvCancel { key_name: String },
    LegalDocsMenu,
    AcceptLegalDocs,
}

impl Callback {
    fn flag(&self) -> &'static str {
        match self {
            Self::MainMenu => MAIN_MENU_FLAG,
            Self::AboutVpn => ABOUT_VPN_FLAG,
            Self::Keys => KEYS_FLAG,
            Self::ViewKey { .. } => VIEW_KEY_FLAG,
            Self::ConnectTv { .. } => CONNECT_TV_FLAG,
            Self::HappTv { .. } => HAPP_TV_FLAG,
            Self::HappTvCancel { .. } => HAPP_TV_CANCEL_FLAG,
            Self::LegalDocsMenu => LEGAL_DOCS_MENU_FLAG,
            Self::AcceptLegalDocs => ACCEPT_LEGAL_DOCS_FLAG,
        }
    }
    fn key_name(&self) -> Option<&str> {
        match self {
            Self::ViewKey { key_name }
            | Self::ConnectTv { key_name }
            | Self::HappTv { key_name }
            | Self::HappTvCancel { key_name } => Some(key_name.as_str()),
            Self::MainMenu
            | Self::AboutVpn
            | Self::Keys
            | Self::LegalDocsMenu
            | Self::AcceptLegalDocs => None,
        }
    }
    pub(crate) fn view_key(key_name: &str) -> Self {
        Self::ViewKey {
            key_name: key_name.to_string(),
        }
    }
    pub(crate) fn connect_tv(key_name: &str) -> Self {
        Self::ConnectTv {
            key_name: key_name.to_string(),
        }
    }
    pub(crate) fn happ_tv(key_name: &str) -> Self {
        Self::HappTv {
            key_name: key_name.to_string(),
        }
    }
    pub(crate) fn happ_tv_cancel(key_name: &str) -> Self {
        Self::HappTvCancel {
            key_name: key_name.to_string(),
        }
    }
}

impl PayloadData for Callback {
    type Error = CallbackParseError;

    fn to_payload(&self) -> String {
        let Some(key_name) = self.key_name() else {
            return self.flag().to_string();
        };
        KEY_LAYOUT
            .make_payload(vec![self.flag(), key_name])
            .unwrap_or_else(|e| {
                log::error!("failed to make payload for {self:?}: {e}");
                self.flag().to_string()
            })
    }

    fn try_from_payload(payload: &str) -> Result<Self, Self::Error> {
        let flag = payload.split(SEP).next().unwrap_or_default();
        let key_name = || -> Result<String, CallbackParseError> {
            let mut data = KEY_LAYOUT.parse_payload(payload)?;
            match data.pop() {
                Some(key_name) if !key_name.is_empty() => Ok(key_name),
                _ => Err(CallbackParseError::EmptyKeyName),
            }
        };
        let no_args = |callback: Callback| {
            if payload == flag {
                Ok(callback)
            } else {
                Err(CallbackParseError::UnexpectedArguments)
            }
        };

        match flag {
            MAIN_MENU_FLAG => no_args(Self::MainMenu),
            ABOUT_VPN_FLAG => no_args(Self::AboutVpn),
            KEYS_FLAG => no_args(Self::Keys),
            LEGAL_DOCS_MENU_FLAG => no_args(Self::LegalDocsMenu),
            ACCEPT_LEGAL_DOCS_FLAG => no_args(Self::AcceptLegalDocs),
            VIEW_KEY_FLAG => Ok(Self::ViewKey {
                key_name: key_name()?,
            }),
            CONNECT_TV_FLAG => Ok(Self::ConnectTv {
                key_name: key_name()?,
            }),
            HAPP_TV_FLAG => Ok(Self::HappTv {
                key_name: key_name()?,
            }),
            HAPP_TV_CANCEL_FLAG => Ok(Self::HappTvCancel {
                key_name: key_name()?,
            }),
            _ => Err(CallbackParseError::UnknownCallbackType),
        }
    }
}

impl TryFrom<&str> for Callback {
    type Error = CallbackParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from_payload(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub(crate) enum CallbackParseError {
    #[error(transparent)]
    InvalidPayload(#[from] PayloadParseError),
    #[error("callback requires a key name")]
    EmptyKeyName,
    #[error("callback does not take arguments")]
    UnexpectedArguments,
    #[error("unknown callback type")]
    UnknownCallbackType,
}
