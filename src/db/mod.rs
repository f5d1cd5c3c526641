pub mod redis;
pub mod storage;

pub use self::redis::{create_redis_client, RedisStorage};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage};
