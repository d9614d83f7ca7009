use serde_json::{Map, Value};

use crate::HookError;

/// Named arguments passed to every callback of one hook invocation.
///
/// Callbacks read the keys they know and ignore the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HookContext {
    values: Map<String, Value>,
}

impl HookContext {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.values.insert(key.into(), value.into());
        self
    }
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
    /// String argument the callback can't work without
    pub fn require_str(&self, key: &'static str) -> Result<&str, HookError> {
        self.get_str(key).ok_or(HookError::MissingArgument(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_args() {
        let ctx = HookContext::new()
            .with("key_name", "key-1")
            .with("user_id", 42u64)
            .with("unknown", true);

        assert_eq!(ctx.get_str("key_name"), Some("key-1"));
        assert_eq!(ctx.get("user_id"), Some(&Value::from(42u64)));
        assert_eq!(ctx.get_str("user_id"), None);
        assert!(matches!(
            ctx.require_str("missing"),
            Err(HookError::MissingArgument("missing"))
        ));
    }
}
