use crate::error::Result;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;

/// A stored association between a short code and the URL it points to.
///
/// This is also the document shape used by the MongoDB backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub short_code: String,
    pub long_url: String,
}

/// The storage technology behind a [`MappingStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    #[serde(rename = "mongodb")]
    MongoDb,
    Redis,
    InMemory,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::MongoDb => "mongodb",
            Backend::Redis => "redis",
            Backend::InMemory => "in-memory",
        }
    }
}

impl Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persists and resolves short code to URL mappings.
///
/// Every backend shares the same contract:
/// - [`put`](MappingStore::put) is an upsert; a later put for the same code
///   replaces the earlier URL.
/// - [`get`](MappingStore::get) returns `Ok(None)` for a code that was never
///   stored. Errors are reserved for backend failures.
///
/// Implementations must be safe to call from many tasks at once.
#[async_trait]
pub trait MappingStore: Send + Sync + 'static {
    /// Stores `url` under `code`, overwriting any previous mapping.
    async fn put(&self, code: &ShortCode, url: &str) -> Result<()>;

    /// Retrieves the URL stored under `code`.
    async fn get(&self, code: &ShortCode) -> Result<Option<String>>;

    /// Which backend this store talks to.
    fn backend(&self) -> Backend;
}

#[async_trait]
impl<S: MappingStore + ?Sized> MappingStore for Arc<S> {
    async fn put(&self, code: &ShortCode, url: &str) -> Result<()> {
        (**self).put(code, url).await
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        (**self).get(code).await
    }

    fn backend(&self) -> Backend {
        (**self).backend()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct TestStore {
        items: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl MappingStore for TestStore {
        async fn put(&self, code: &ShortCode, url: &str) -> Result<()> {
            let mut items = self.items.lock().await;
            items.insert(code.as_str().to_string(), url.to_string());
            Ok(())
        }

        async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
            let items = self.items.lock().await;
            Ok(items.get(code.as_str()).cloned())
        }

        fn backend(&self) -> Backend {
            Backend::InMemory
        }
    }

    #[tokio::test]
    async fn arc_store_delegates_to_inner() {
        let store: Arc<dyn MappingStore> = Arc::new(TestStore::default());
        let code = ShortCode::new_unchecked("abc123");

        store.put(&code, "https://example.com").await.unwrap();

        assert_eq!(
            store.get(&code).await.unwrap().as_deref(),
            Some("https://example.com")
        );
        assert_eq!(store.backend(), Backend::InMemory);
    }

    #[test]
    fn backend_names() {
        assert_eq!(Backend::MongoDb.to_string(), "mongodb");
        assert_eq!(Backend::Redis.to_string(), "redis");
        assert_eq!(Backend::InMemory.to_string(), "in-memory");
        assert_eq!(
            serde_json::to_string(&Backend::InMemory).unwrap(),
            "\"in-memory\""
        );
    }
}
