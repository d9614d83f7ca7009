use serde_json::{Map, Value};
use teloxide::types::InlineKeyboardButton;

pub type ButtonRow = Vec<InlineKeyboardButton>;

/// What one hook callback wants to do with the menu keyboard
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HookResult {
    /// No effect
    #[default]
    None,
    /// Append buttons as one new row
    Add(ButtonRow),
    /// Strip matching buttons from the keyboard
    Remove(Removal),
    /// Several instructions from one callback. Removals are applied before
    /// additions, nested composites are malformed
    Composite(Vec<HookResult>),
}

impl HookResult {
    pub fn button(button: InlineKeyboardButton) -> Self {
        Self::Add(vec![button])
    }
    pub fn row<I>(buttons: I) -> Self
    where
        I: IntoIterator<Item = InlineKeyboardButton>,
    {
        Self::Add(buttons.into_iter().collect())
    }
    pub fn remove<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Remove(Removal {
            exact: ids.into_iter().map(Into::into).collect(),
            prefix: None,
        })
    }
    pub fn remove_prefix<S: Into<String>>(prefix: S) -> Self {
        Self::Remove(Removal {
            exact: vec![],
            prefix: Some(prefix.into()),
        })
    }
    /// Combine two results into one, flattening composites
    pub fn and(self, other: HookResult) -> Self {
        match (self, other) {
            (Self::None, r) | (r, Self::None) => r,
            (Self::Composite(mut left), Self::Composite(right)) => {
                left.extend(right);
                Self::Composite(left)
            }
            (Self::Composite(mut left), r) => {
                left.push(r);
                Self::Composite(left)
            }
            (l, Self::Composite(right)) => {
                let mut items = Vec::with_capacity(right.len() + 1);
                items.push(l);
                items.extend(right);
                Self::Composite(items)
            }
            (l, r) => Self::Composite(vec![l, r]),
        }
    }
    /// True if applying this result can't change a keyboard
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Add(row) => row.is_empty(),
            Self::Remove(removal) => removal.is_empty(),
            Self::Composite(items) => items.iter().all(Self::is_empty),
        }
    }
}

impl From<Option<HookResult>> for HookResult {
    fn from(value: Option<HookResult>) -> Self {
        value.unwrap_or_default()
    }
}

impl FromIterator<HookResult> for HookResult {
    fn from_iter<T: IntoIterator<Item = HookResult>>(iter: T) -> Self {
        iter.into_iter().fold(Self::None, Self::and)
    }
}

/// Buttons to strip: exact identifiers, or everything starting with `prefix`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Removal {
    pub exact: Vec<String>,
    pub prefix: Option<String>,
}

impl Removal {
    pub fn matches(&self, id: &str) -> bool {
        self.exact.iter().any(|e| e == id)
            || self
                .prefix
                .as_deref()
                .is_some_and(|p| !p.is_empty() && id.starts_with(p))
    }
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.prefix.as_deref().map_or(true, str::is_empty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed hook result: {0}")]
pub struct MalformedResult(pub String);

impl MalformedResult {
    fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

const BUTTON_KEY: &str = "button";
const BUTTONS_KEY: &str = "buttons";
const REMOVE_KEY: &str = "remove";
const REMOVE_PREFIX_KEY: &str = "remove_prefix";

/// Untyped form, as produced by modules that speak the JSON shape:
///
/// - `{"button": <button>}`
/// - `{"buttons": [<button>, ...]}`
/// - `{"remove": [<id>, ...], "remove_prefix": <prefix or null>}`
/// - a list of such objects, or `null`
impl TryFrom<Value> for HookResult {
    type Error = MalformedResult;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Self::None),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => parse_object(map),
                    Value::Null => Ok(Self::None),
                    other => Err(MalformedResult::new(format!(
                        "expected object in list, got {other}"
                    ))),
                })
                .collect::<Result<HookResult, _>>(),
            Value::Object(map) => parse_object(map),
            other => Err(MalformedResult::new(format!(
                "expected object, list or null, got {other}"
            ))),
        }
    }
}

fn parse_object(mut map: Map<String, Value>) -> Result<HookResult, MalformedResult> {
    let mut result = HookResult::None;
    let mut known = false;

    let remove = map.remove(REMOVE_KEY);
    let prefix = map.remove(REMOVE_PREFIX_KEY);
    if remove.is_some() || prefix.is_some() {
        known = true;
        let exact = match remove {
            None | Some(Value::Null) => vec![],
            Some(Value::Array(ids)) => ids
                .into_iter()
                .map(|id| match id {
                    Value::String(s) => Ok(s),
                    other => Err(MalformedResult::new(format!(
                        "removal id must be a string, got {other}"
                    ))),
                })
                .collect::<Result<_, _>>()?,
            Some(other) => {
                return Err(MalformedResult::new(format!(
                    "'{REMOVE_KEY}' must be a list, got {other}"
                )))
            }
        };
        let prefix = match prefix {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => {
                return Err(MalformedResult::new(format!(
                    "'{REMOVE_PREFIX_KEY}' must be a string, got {other}"
                )))
            }
        };
        result = HookResult::Remove(Removal { exact, prefix });
    }

    // "button" takes precedence over "buttons"
    if let Some(button) = map.remove(BUTTON_KEY) {
        known = true;
        if !button.is_null() {
            result = result.and(HookResult::button(parse_button(button)?));
        }
    } else if let Some(buttons) = map.remove(BUTTONS_KEY) {
        known = true;
        match buttons {
            Value::Null => {}
            Value::Array(items) => {
                let row = items
                    .into_iter()
                    .map(parse_button)
                    .collect::<Result<ButtonRow, _>>()?;
                result = result.and(HookResult::Add(row));
            }
            other => {
                return Err(MalformedResult::new(format!(
                    "'{BUTTONS_KEY}' must be a list, got {other}"
                )))
            }
        }
    }

    if !known && !map.is_empty() {
        let keys = map.keys().cloned().collect::<Vec<_>>().join(", ");
        return Err(MalformedResult::new(format!("unknown keys: {keys}")));
    }
    Ok(result)
}

fn parse_button(value: Value) -> Result<InlineKeyboardButton, MalformedResult> {
    serde_json::from_value(value).map_err(|e| MalformedResult::new(format!("invalid button: {e}")))
}
