use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use crate::db::KeyValueStore;
use crate::error::AppResult;

const KEY_PREFIX: &str = "movie-explorer";

/// Creates a Redis client for durable storage
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Key/value storage backed by plain Redis strings
///
/// Values are written without a TTL. Keys are namespaced so the store can share a
/// Redis database with other applications.
#[derive(Clone)]
pub struct RedisStorage {
    conn: ConnectionManager,
}

impl RedisStorage {
    /// Connects and returns a storage handle; reconnection is handled by the manager
    pub async fn connect(client: Client) -> AppResult<Self> {
        let conn = ConnectionManager::new(client).await?;
        tracing::info!("Connected to Redis storage");
        Ok(Self { conn })
    }
}

fn namespaced(key: &str) -> String {
    format!("{}:{}", KEY_PREFIX, key)
}

#[async_trait::async_trait]
impl KeyValueStore for RedisStorage {
    async fn read(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(namespaced(key)).await?;
        Ok(value)
    }

    async fn write(&self, key: &str, value: &str) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(namespaced(key), value).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
