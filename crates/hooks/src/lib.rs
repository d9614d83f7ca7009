//! Hooks let feature modules contribute buttons to menus rendered by the host.
//!
//! Modules [register](HookRegistry::register) callbacks under a hook name at
//! startup. When the host renders a menu, it [invokes](HookRegistry::invoke)
//! the hook and folds the collected [`HookResult`]s into the base keyboard
//! with [`KeyboardBuilder::merge_hook_results`].

mod context;
mod keyboard;
mod registry;
mod result;

pub use context::HookContext;
pub use keyboard::{button_id, insert_hook_buttons, KeyboardBuilder};
pub use registry::{AsyncFnHook, FnHook, Hook, HookError, HookRegistry};
pub use result::{ButtonRow, HookResult, MalformedResult, Removal};
