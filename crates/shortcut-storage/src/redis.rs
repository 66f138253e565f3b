use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use shortcut_core::error::Result;
use shortcut_core::{Backend, MappingStore, ShortCode, StorageError};
use tracing::{debug, trace, warn};

/// A Redis-backed mapping store.
///
/// Each mapping is a plain string key holding the URL. No expiry is set, so
/// mappings stay until Redis itself drops them (eviction policy, a restart
/// without persistence, `FLUSHDB`). That durability is an operational
/// property of the Redis deployment.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    key_prefix: String,
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

pub(crate) fn map_redis_error(operation: &str, err: redis::RedisError) -> StorageError {
    let message = format!("{operation}: {err}");
    if err.is_timeout() {
        StorageError::Timeout(message)
    } else if err.is_connection_refusal() || err.is_connection_dropped() || err.is_io_error() {
        StorageError::Unavailable(message)
    } else {
        StorageError::Operation(message)
    }
}

impl RedisStore {
    /// Creates a store on top of an existing connection manager, with keys
    /// equal to the bare short code.
    pub fn new(conn: ConnectionManager) -> Self {
        Self::with_prefix(conn, "")
    }

    /// Creates a store whose keys are `key_prefix` followed by the short code.
    pub fn with_prefix(conn: ConnectionManager, key_prefix: impl Into<String>) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
        }
    }

    /// Connects to database 0 of the Redis server at `host:port`.
    pub async fn connect(host: &str, port: u16, key_prefix: impl Into<String>) -> Result<Self> {
        let url = redis_url(host, port);
        let client = redis::Client::open(url.as_str())
            .map_err(|e| map_redis_error("invalid redis address", e))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| StorageError::Unavailable(format!("failed to connect to redis: {e}")))?;
        debug!(host, port, "connected to redis");
        Ok(Self::with_prefix(conn, key_prefix))
    }

    /// Generates the Redis key for a short code.
    fn key(&self, code: &ShortCode) -> String {
        format!("{}{}", self.key_prefix, code.as_str())
    }
}

fn redis_url(host: &str, port: u16) -> String {
    format!("redis://{host}:{port}/0")
}

#[async_trait]
impl MappingStore for RedisStore {
    async fn put(&self, code: &ShortCode, url: &str) -> Result<()> {
        let key = self.key(code);
        trace!(code = %code, "storing mapping in redis");

        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(&key, url).await.map_err(|e| {
            warn!(code = %code, error = %e, "redis error on set");
            map_redis_error("failed to write value to redis", e)
        })
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        let key = self.key(code);
        trace!(code = %code, "fetching mapping from redis");

        let mut conn = self.conn.clone();
        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(url)) => {
                debug!(code = %code, "redis hit");
                Ok(Some(url))
            }
            Ok(None) => {
                trace!(code = %code, "redis miss");
                Ok(None)
            }
            Err(e) => {
                warn!(code = %code, error = %e, "redis error on get");
                Err(map_redis_error("failed to fetch value from redis", e))
            }
        }
    }

    fn backend(&self) -> Backend {
        Backend::Redis
    }
}
