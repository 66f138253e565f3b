use async_trait::async_trait;
use shortcut_core::error::Result;
use shortcut_core::{Backend, MappingStore, ShortCode, StorageError};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// A store decorator that bounds every call by a fixed timeout.
///
/// A call still pending when the timeout elapses is dropped and reported as
/// [`StorageError::Timeout`].
#[derive(Debug, Clone)]
pub struct TimeoutStore<S> {
    inner: S,
    timeout: Duration,
}

impl<S: MappingStore> TimeoutStore<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    backend = %self.inner.backend(),
                    operation,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "backend call timed out"
                );
                Err(StorageError::Timeout(format!(
                    "{} {} exceeded {:?}",
                    self.inner.backend(),
                    operation,
                    self.timeout
                )))
            }
        }
    }
}

#[async_trait]
impl<S: MappingStore> MappingStore for TimeoutStore<S> {
    async fn put(&self, code: &ShortCode, url: &str) -> Result<()> {
        self.bounded("put", self.inner.put(code, url)).await
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        self.bounded("get", self.inner.get(code)).await
    }

    fn backend(&self) -> Backend {
        self.inner.backend()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryStore;

    /// Never answers.
    struct StalledStore;

    #[async_trait]
    impl MappingStore for StalledStore {
        async fn put(&self, _code: &ShortCode, _url: &str) -> Result<()> {
            std::future::pending().await
        }

        async fn get(&self, _code: &ShortCode) -> Result<Option<String>> {
            std::future::pending().await
        }

        fn backend(&self) -> Backend {
            Backend::Redis
        }
    }

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_put_times_out() {
        let store = TimeoutStore::new(StalledStore, Duration::from_millis(50));

        let err = store.put(&code("abc123"), "https://example.com").await.unwrap_err();

        assert!(matches!(err, StorageError::Timeout(_)));
        assert!(err.is_unavailable());
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_get_times_out() {
        let store = TimeoutStore::new(StalledStore, Duration::from_secs(2));

        let err = store.get(&code("abc123")).await.unwrap_err();

        assert!(matches!(err, StorageError::Timeout(_)));
    }

    #[tokio::test]
    async fn fast_calls_pass_through() {
        let store = TimeoutStore::new(InMemoryStore::new(), Duration::from_secs(1));

        store.put(&code("abc123"), "https://example.com").await.unwrap();

        assert_eq!(
            store.get(&code("abc123")).await.unwrap().as_deref(),
            Some("https://example.com")
        );
        assert_eq!(store.backend(), Backend::InMemory);
    }
}
