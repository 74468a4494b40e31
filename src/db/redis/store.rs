use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use redis::Client;

use crate::db::KeyValueStore;
use crate::error::AppResult;

/// Creates a Redis client for the favorites store
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Key-value store backed by Redis
///
/// Values are written with plain `SET` and no expiry. The connection manager
/// reconnects transparently after a dropped connection; a request made while
/// Redis is down fails with `StorageUnavailable`.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connects to Redis and returns a ready store
    pub async fn connect(client: Client) -> AppResult<Self> {
        let conn = ConnectionManager::new(client).await?;
        tracing::info!("Connected to Redis");
        Ok(Self { conn })
    }
}

#[async_trait::async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
