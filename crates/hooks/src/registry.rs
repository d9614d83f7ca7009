//! Hook registry: hook name -> callbacks in registration order.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::{HookContext, HookResult};

/// Callback registered under a hook name
#[async_trait]
pub trait Hook: Send + Sync {
    async fn call(&self, ctx: &HookContext) -> Result<HookResult, HookError>;
}

/// Synchronous callback
pub struct FnHook<F>(pub F);

#[async_trait]
impl<F> Hook for FnHook<F>
where
    F: Fn(&HookContext) -> Result<HookResult, HookError> + Send + Sync,
{
    async fn call(&self, ctx: &HookContext) -> Result<HookResult, HookError> {
        (self.0)(ctx)
    }
}

/// Callback returning a future, gets its own copy of the context
pub struct AsyncFnHook<F>(pub F);

#[async_trait]
impl<F, Fut> Hook for AsyncFnHook<F>
where
    F: Fn(HookContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<HookResult, HookError>> + Send + 'static,
{
    async fn call(&self, ctx: &HookContext) -> Result<HookResult, HookError> {
        (self.0)(ctx.clone()).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("missing argument '{0}'")]
    MissingArgument(&'static str),
    #[error("callback panicked")]
    Panicked,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Registry of hook callbacks.
///
/// Filled through `&mut self` at startup, then shared (usually behind an
/// [`Arc`]) and only read while serving updates.
#[derive(Default)]
pub struct HookRegistry {
    hooks: HashMap<String, Vec<Arc<dyn Hook>>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `hook` to the callbacks of `hook_name`
    pub fn register<H>(&mut self, hook_name: impl Into<String>, hook: H) -> &mut Self
    where
        H: Hook + 'static,
    {
        let hook_name = hook_name.into();
        log::debug!("registering callback for hook '{hook_name}'");
        self.hooks.entry(hook_name).or_default().push(Arc::new(hook));
        self
    }

    pub fn register_fn<F>(&mut self, hook_name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&HookContext) -> Result<HookResult, HookError> + Send + Sync + 'static,
    {
        self.register(hook_name, FnHook(f))
    }

    pub fn register_async<F, Fut>(&mut self, hook_name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(HookContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HookResult, HookError>> + Send + 'static,
    {
        self.register(hook_name, AsyncFnHook(f))
    }

    /// Number of callbacks registered for `hook_name`
    pub fn count(&self, hook_name: &str) -> usize {
        self.hooks.get(hook_name).map_or(0, Vec::len)
    }

    /// Remove callbacks of one hook, or of every hook when `hook_name` is None
    pub fn clear(&mut self, hook_name: Option<&str>) {
        match hook_name {
            Some(name) => {
                self.hooks.remove(name);
            }
            None => self.hooks.clear(),
        }
    }

    pub fn hook_names(&self) -> impl Iterator<Item = &str> {
        self.hooks.keys().map(String::as_str)
    }

    /// Call every callback of `hook_name` in registration order and return
    /// one outcome per callback.
    ///
    /// Callbacks are awaited one after another, each on its own task, so a
    /// panic is reported as [`HookError::Panicked`] instead of unwinding into
    /// the caller.
    pub async fn invoke_all(
        &self,
        hook_name: &str,
        ctx: HookContext,
    ) -> Vec<Result<HookResult, HookError>> {
        let Some(hooks) = self.hooks.get(hook_name) else {
            return vec![];
        };

        let ctx = Arc::new(ctx);
        let mut outcomes = Vec::with_capacity(hooks.len());
        for hook in hooks {
            let hook = Arc::clone(hook);
            let ctx = Arc::clone(&ctx);
            let outcome = match tokio::spawn(async move { hook.call(&ctx).await }).await {
                Ok(outcome) => outcome,
                Err(e) if e.is_panic() => Err(HookError::Panicked),
                Err(e) => Err(HookError::Other(e.into())),
            };
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Call every callback of `hook_name` and collect the results that have
    /// an effect. Failed callbacks are logged and skipped, so this never fails
    pub async fn invoke(&self, hook_name: &str, ctx: HookContext) -> Vec<HookResult> {
        self.invoke_all(hook_name, ctx)
            .await
            .into_iter()
            .enumerate()
            .filter_map(|(i, outcome)| match outcome {
                Ok(HookResult::None) => None,
                Ok(result) => Some(result),
                Err(e) => {
                    log::error!("callback #{i} of hook '{hook_name}' failed: {e}");
                    None
                }
            })
            .collect()
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.hooks.iter().map(|(name, hooks)| (name, hooks.len())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use teloxide::types::InlineKeyboardButton as Btn;

    use super::*;

    const HOOK: &str = "view_key_menu";

    fn button(i: usize) -> HookResult {
        HookResult::button(Btn::callback(format!("btn {i}"), format!("btn|{i}")))
    }

    #[tokio::test]
    async fn test_unknown_hook() {
        common::init_logger();

        let mut registry = HookRegistry::new();
        registry.register_fn(HOOK, |_| Ok(button(0)));

        assert_eq!(registry.count("about_vpn"), 0);
        assert!(registry.invoke("about_vpn", HookContext::new()).await.is_empty());
        assert!(registry.invoke_all("about_vpn", HookContext::new()).await.is_empty());
        // names are case-sensitive
        assert_eq!(registry.count("VIEW_KEY_MENU"), 0);
    }

    #[tokio::test]
    async fn test_invoke_in_registration_order() {
        common::init_logger();

        let mut registry = HookRegistry::new();
        for i in 0..4 {
            registry.register_fn(HOOK, move |_| Ok(button(i)));
        }
        assert_eq!(registry.count(HOOK), 4);

        let results = registry.invoke(HOOK, HookContext::new()).await;
        assert_eq!(results, (0..4).map(button).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_same_context_and_none_omitted() {
        common::init_logger();

        let mut registry = HookRegistry::new();
        registry
            .register_fn(HOOK, |ctx| {
                let key = ctx.require_str("key_name")?;
                Ok(HookResult::remove([format!("connect_tv|{key}")]))
            })
            .register_fn(HOOK, |_| Ok(HookResult::None))
            .register_async(HOOK, |ctx: HookContext| async move {
                let key = ctx.require_str("key_name")?.to_string();
                Ok::<_, HookError>(HookResult::button(Btn::callback("tv", format!("happ_tv|{key}"))))
            });

        let ctx = HookContext::new().with("key_name", "k1").with("extra", 1);
        let results = registry.invoke(HOOK, ctx).await;
        assert_eq!(
            results,
            vec![
                HookResult::remove(["connect_tv|k1"]),
                HookResult::button(Btn::callback("tv", "happ_tv|k1")),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_callbacks_skipped() {
        common::init_logger();

        let mut registry = HookRegistry::new();
        registry
            .register_fn(HOOK, |_| Ok(button(0)))
            .register_fn(HOOK, |_| Err(anyhow::anyhow!("boom").into()))
            .register_fn(HOOK, |ctx| ctx.require_str("key_name").map(|_| button(99)))
            .register_fn(HOOK, |_| -> Result<HookResult, HookError> { panic!("callback bug") })
            .register_fn(HOOK, |_| Ok(button(4)));

        let outcomes = registry.invoke_all(HOOK, HookContext::new()).await;
        assert_eq!(outcomes.len(), 5);
        assert!(matches!(outcomes[1], Err(HookError::Other(_))));
        assert!(matches!(outcomes[2], Err(HookError::MissingArgument("key_name"))));
        assert!(matches!(outcomes[3], Err(HookError::Panicked)));

        let results = registry.invoke(HOOK, HookContext::new()).await;
        assert_eq!(results, vec![button(0), button(4)]);
    }

    #[tokio::test]
    async fn test_async_callbacks_are_sequential() {
        common::init_logger();

        let calls = Arc::new(Mutex::new(vec![]));
        let mut registry = HookRegistry::new();

        let log = Arc::clone(&calls);
        registry.register_async(HOOK, move |_| {
            let log = Arc::clone(&log);
            async move {
                tokio::time::sleep(Duration::from_millis(30)).await;
                log.lock().unwrap().push("slow");
                Ok::<_, HookError>(button(0))
            }
        });
        let log = Arc::clone(&calls);
        registry.register_fn(HOOK, move |_| {
            log.lock().unwrap().push("fast");
            Ok(button(1))
        });

        let results = registry.invoke(HOOK, HookContext::new()).await;
        assert_eq!(results, vec![button(0), button(1)]);
        assert_eq!(*calls.lock().unwrap(), vec!["slow", "fast"]);
    }

    #[tokio::test]
    async fn test_clear() {
        common::init_logger();

        let mut registry = HookRegistry::new();
        registry
            .register_fn(HOOK, |_| Ok(button(0)))
            .register_fn(HOOK, |_| Ok(button(1)))
            .register_fn("about_vpn", |_| Ok(button(2)));

        registry.clear(Some(HOOK));
        assert_eq!(registry.count(HOOK), 0);
        assert_eq!(registry.count("about_vpn"), 1);

        registry.clear(Some("never_registered"));
        registry.clear(None);
        assert_eq!(registry.count("about_vpn"), 0);
        assert_eq!(registry.hook_names().count(), 0);
    }
}
