use crate::config::BackendSelection;
use crate::memory::InMemoryStore;
use crate::mongo::MongoStore;
use crate::redis::RedisStore;
use crate::timeout::TimeoutStore;
use async_trait::async_trait;
use shortcut_core::error::Result;
use shortcut_core::{Backend, MappingStore, ShortCode, StorageError};
use std::future::Future;
use std::time::Duration;
use tracing::info;

/// The mapping store chosen at startup.
///
/// The network backends are always wrapped in a [`TimeoutStore`].
#[derive(Debug)]
pub enum AnyStore {
    MongoDb(TimeoutStore<MongoStore>),
    Redis(TimeoutStore<RedisStore>),
    InMemory(InMemoryStore),
}

/// Builds the store described by `selection`.
///
/// Connection setup is bounded by the selection's timeout as well.
pub async fn connect(selection: BackendSelection) -> Result<AnyStore> {
    let store = match selection {
        BackendSelection::MongoDb {
            uri,
            database,
            collection,
            timeout,
        } => {
            let store = within(
                timeout,
                "mongodb",
                MongoStore::connect(&uri, &database, &collection, timeout),
            )
            .await?;
            AnyStore::MongoDb(TimeoutStore::new(store, timeout))
        }
        BackendSelection::Redis {
            host,
            port,
            key_prefix,
            timeout,
        } => {
            let store = within(
                timeout,
                "redis",
                RedisStore::connect(&host, port, key_prefix),
            )
            .await?;
            AnyStore::Redis(TimeoutStore::new(store, timeout))
        }
        BackendSelection::InMemory => AnyStore::InMemory(InMemoryStore::new()),
    };

    info!(backend = %store.backend(), "mapping store ready");
    Ok(store)
}

async fn within<T>(
    timeout: Duration,
    backend: &str,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::time::timeout(timeout, fut).await.map_err(|_| {
        StorageError::Unavailable(format!("{backend} did not answer within {timeout:?}"))
    })?
}

#[async_trait]
impl MappingStore for AnyStore {
    async fn put(&self, code: &ShortCode, url: &str) -> Result<()> {
        match self {
            AnyStore::MongoDb(store) => store.put(code, url).await,
            AnyStore::Redis(store) => store.put(code, url).await,
            AnyStore::InMemory(store) => store.put(code, url).await,
        }
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        match self {
            AnyStore::MongoDb(store) => store.get(code).await,
            AnyStore::Redis(store) => store.get(code).await,
            AnyStore::InMemory(store) => store.get(code).await,
        }
    }

    fn backend(&self) -> Backend {
        match self {
            AnyStore::MongoDb(store) => store.backend(),
            AnyStore::Redis(store) => store.backend(),
            AnyStore::InMemory(store) => store.backend(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageSettings;

    #[tokio::test]
    async fn empty_settings_connect_in_memory() {
        let store = connect(StorageSettings::builder().build().selection())
            .await
            .unwrap();

        assert!(matches!(store, AnyStore::InMemory(_)));
        assert_eq!(store.backend(), Backend::InMemory);
    }

    #[tokio::test]
    async fn in_memory_round_trip_through_any_store() {
        let store = connect(BackendSelection::InMemory).await.unwrap();
        let code = ShortCode::new_unchecked("abc123");

        assert!(store.get(&code).await.unwrap().is_none());
        store.put(&code, "https://example.com").await.unwrap();
        store.put(&code, "https://example.org").await.unwrap();

        assert_eq!(
            store.get(&code).await.unwrap().as_deref(),
            Some("https://example.org")
        );
    }

    #[tokio::test]
    async fn unreachable_redis_fails_as_unavailable() {
        // Port 1 is reserved and closed on any sane test host.
        let selection = BackendSelection::Redis {
            host: "127.0.0.1".to_string(),
            port: 1,
            key_prefix: String::new(),
            timeout: Duration::from_millis(500),
        };

        let err = connect(selection).await.unwrap_err();
        assert!(err.is_unavailable(), "unexpected error: {err:?}");
    }
}
