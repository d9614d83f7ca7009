use std::{collections::HashMap, sync::Arc};

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use common::types::UserId;

/// Subscription key as stored by the host
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KeyRecord {
    pub name: String,
    pub owner: u64,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub remnawave_link: Option<String>,
}

impl KeyRecord {
    /// Link handed to client apps: the key itself, or the panel link
    pub fn subscription_link(&self) -> Option<&str> {
        [&self.key, &self.remnawave_link]
            .into_iter()
            .filter_map(|s| s.as_deref())
            .find(|s| !s.is_empty())
    }
}

/// Host persistence, only the lookups the modules need
#[async_trait]
pub trait Store: Send + Sync {
    /// Key of `user_id` by name, keys of other users are not found
    async fn user_key(&self, user_id: UserId, key_name: &str) -> Result<Option<KeyRecord>>;
    async fn user_keys(&self, user_id: UserId) -> Result<Vec<KeyRecord>>;
    /// 0 when the user never had a trial
    async fn trial_status(&self, user_id: UserId) -> Result<u8>;

    async fn key_count(&self, user_id: UserId) -> Result<usize> {
        Ok(self.user_keys(user_id).await?.len())
    }
}

pub type SharedStore = Arc<dyn Store>;

/// Read-only store filled once at startup
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    keys: Vec<KeyRecord>,
    trials: HashMap<UserId, u8>,
}

impl MemoryStore {
    pub fn new(keys: Vec<KeyRecord>, trial_users: Vec<u64>) -> Self {
        Self {
            keys,
            trials: trial_users.into_iter().map(|id| (UserId(id), 1)).collect(),
        }
    }
    pub fn shared(self) -> SharedStore {
        Arc::new(self)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn user_key(&self, user_id: UserId, key_name: &str) -> Result<Option<KeyRecord>> {
        Ok(self
            .keys
            .iter()
            .find(|k| k.owner == user_id.0 && k.name == key_name)
            .cloned())
    }
    async fn user_keys(&self, user_id: UserId) -> Result<Vec<KeyRecord>> {
        Ok(self
            .keys
            .iter()
            .filter(|k| k.owner == user_id.0)
            .cloned()
            .collect())
    }
    async fn trial_status(&self, user_id: UserId) -> Result<u8> {
        Ok(self.trials.get(&user_id).copied().unwrap_or_default())
    }
}
