use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::db::KeyValueStore;
use crate::error::AppResult;

/// In-process key-value store
///
/// Data lives only as long as the process. Used for local runs without Redis
/// and as the backing store in tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
