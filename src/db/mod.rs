pub mod memory;
pub mod redis;
pub mod store;

use std::sync::Arc;

use crate::config::{Config, StorageBackend};

pub use memory::MemoryStore;
pub use self::redis::create_redis_client;
pub use self::redis::RedisStore;
pub use store::KeyValueStore;

/// Builds the key-value store selected by configuration
pub async fn create_store(config: &Config) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config.storage_backend {
        StorageBackend::Redis => {
            let client = create_redis_client(&config.redis_url)?;
            Arc::new(RedisStore::connect(client).await?)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; favorites will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    tracing::info!(backend = store.name(), "Key-value store ready");
    Ok(store)
}
