use async_trait::async_trait;
use shortcut_core::{Backend, MappingStore, ShortCode, Shortened, Shortener, ShortenerError};
use shortcut_generator::Generator;
use std::sync::Arc;
use tracing::{debug, trace, warn};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// What to do when a generated code already maps to another URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Store without looking; the older mapping is replaced.
    Overwrite,
    /// Look the code up first and draw a new one if it belongs to a different
    /// URL, giving up after `max_attempts` draws.
    Retry { max_attempts: u32 },
}

impl CollisionPolicy {
    /// `1` means a single unchecked draw, i.e. [`CollisionPolicy::Overwrite`].
    pub fn from_max_attempts(max_attempts: u32) -> Self {
        if max_attempts <= 1 {
            Self::Overwrite
        } else {
            Self::Retry { max_attempts }
        }
    }
}

impl Default for CollisionPolicy {
    fn default() -> Self {
        Self::Retry {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// A concrete implementation of the `Shortener` trait.
///
/// Lookup-then-put is not atomic: two processes drawing the same code at the
/// same instant can still overwrite each other. With 62^6 codes that window
/// is accepted.
///
/// Codes listed as reserved (route names such as `health`) are never handed
/// out; drawing one counts as a collision.
#[derive(Debug, Clone)]
pub struct ShortenerService<S, G> {
    store: Arc<S>,
    generator: Arc<G>,
    policy: CollisionPolicy,
    reserved: Vec<String>,
}

impl<S: MappingStore, G: Generator> ShortenerService<S, G> {
    /// Creates a service with the default collision policy.
    pub fn new(store: S, generator: G) -> Self {
        Self::with_policy(store, generator, CollisionPolicy::default())
    }

    pub fn with_policy(store: S, generator: G, policy: CollisionPolicy) -> Self {
        Self {
            store: Arc::new(store),
            generator: Arc::new(generator),
            policy,
            reserved: Vec::new(),
        }
    }

    /// Marks `codes` as never to be allocated.
    pub fn with_reserved<I>(mut self, codes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.reserved.extend(codes.into_iter().map(Into::into));
        self
    }

    pub fn reserved(&self) -> &[String] {
        &self.reserved
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Draws one code, or `None` if it landed on a reserved one.
    fn draw(&self) -> Option<ShortCode> {
        let code: ShortCode = self.generator.generate().into();
        if self.reserved.iter().any(|reserved| reserved == code.as_str()) {
            debug!(code = %code, "drew a reserved code");
            return None;
        }
        Some(code)
    }

    /// A blind draw for [`CollisionPolicy::Overwrite`], repeated only when it
    /// hits a reserved code.
    fn draw_unchecked(&self) -> Result<ShortCode, ShortenerError> {
        (0..DEFAULT_MAX_ATTEMPTS)
            .find_map(|_| self.draw())
            .ok_or(ShortenerError::ExhaustedRetries {
                attempts: DEFAULT_MAX_ATTEMPTS,
            })
    }

    /// Draws codes until one is free or already points at `long_url`.
    ///
    /// At least one code is always drawn, whatever `max_attempts` says.
    async fn allocate(&self, long_url: &str, max_attempts: u32) -> Result<ShortCode, ShortenerError> {
        let max_attempts = max_attempts.max(1);

        for attempt in 1..=max_attempts {
            let Some(code) = self.draw() else {
                continue;
            };

            match self.store.get(&code).await? {
                None => return Ok(code),
                Some(existing) if existing == long_url => {
                    debug!(code = %code, "code already maps to this url");
                    return Ok(code);
                }
                Some(_) => {
                    warn!(code = %code, attempt, max_attempts, "short code collision");
                }
            }
        }

        Err(ShortenerError::ExhaustedRetries {
            attempts: max_attempts,
        })
    }
}

#[async_trait]
impl<S: MappingStore, G: Generator> Shortener for ShortenerService<S, G> {
    async fn shorten(&self, long_url: &str) -> Result<Shortened, ShortenerError> {
        if long_url.is_empty() {
            return Err(ShortenerError::MissingUrl);
        }

        let code = match self.policy {
            CollisionPolicy::Overwrite => self.draw_unchecked()?,
            CollisionPolicy::Retry { max_attempts } => self.allocate(long_url, max_attempts).await?,
        };

        self.store.put(&code, long_url).await?;
        debug!(code = %code, backend = %self.store.backend(), "stored mapping");

        Ok(Shortened {
            code,
            long_url: long_url.to_string(),
        })
    }

    async fn resolve(&self, code: &ShortCode) -> Result<Option<String>, ShortenerError> {
        trace!(code = %code, "resolving short code");
        Ok(self.store.get(code).await?)
    }

    fn backend(&self) -> Backend {
        self.store.backend()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shortcut_core::error::Result as StorageResult;
    use shortcut_core::StorageError;
    use shortcut_generator::RandomGenerator;
    use shortcut_storage::InMemoryStore;
    use std::sync::Mutex;

    /// Hands out a fixed sequence of codes, repeating the last one.
    struct ScriptedGenerator {
        codes: Mutex<Vec<&'static str>>,
    }

    impl ScriptedGenerator {
        fn new(mut codes: Vec<&'static str>) -> Self {
            codes.reverse();
            Self {
                codes: Mutex::new(codes),
            }
        }
    }

    impl Generator for ScriptedGenerator {
        type Output = ShortCode;

        fn generate(&self) -> ShortCode {
            let mut codes = self.codes.lock().unwrap();
            let next = if codes.len() > 1 {
                codes.pop().unwrap()
            } else {
                codes[0]
            };
            ShortCode::new_unchecked(next)
        }
    }

    struct DownStore;

    #[async_trait]
    impl MappingStore for DownStore {
        async fn put(&self, _code: &ShortCode, _url: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("connection refused".into()))
        }

        async fn get(&self, _code: &ShortCode) -> StorageResult<Option<String>> {
            Err(StorageError::Unavailable("connection refused".into()))
        }

        fn backend(&self) -> Backend {
            Backend::Redis
        }
    }

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    #[tokio::test]
    async fn shorten_then_resolve() {
        let service = ShortenerService::new(InMemoryStore::new(), RandomGenerator::default());

        let shortened = service.shorten("https://example.com").await.unwrap();

        assert_eq!(shortened.code.len(), 6);
        assert_eq!(shortened.long_url, "https://example.com");
        assert_eq!(
            service.resolve(&shortened.code).await.unwrap().as_deref(),
            Some("https://example.com")
        );
    }

    #[tokio::test]
    async fn resolve_unknown_code_is_none() {
        let service = ShortenerService::new(InMemoryStore::new(), RandomGenerator::default());

        assert!(service.resolve(&code("doesnotexist")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_url_is_rejected_before_touching_the_store() {
        let service = ShortenerService::new(DownStore, RandomGenerator::default());

        assert_eq!(service.shorten("").await, Err(ShortenerError::MissingUrl));
    }

    #[tokio::test]
    async fn whitespace_url_is_stored_verbatim() {
        let service = ShortenerService::new(InMemoryStore::new(), RandomGenerator::default());

        let shortened = service.shorten("   ").await.unwrap();

        assert_eq!(shortened.long_url, "   ");
        assert_eq!(
            service.resolve(&shortened.code).await.unwrap().as_deref(),
            Some("   ")
        );
    }

    #[tokio::test]
    async fn zero_max_attempts_still_draws_once() {
        let service = ShortenerService::with_policy(
            InMemoryStore::new(),
            RandomGenerator::default(),
            CollisionPolicy::Retry { max_attempts: 0 },
        );

        let shortened = service.shorten("https://example.com").await.unwrap();

        assert_eq!(
            service.resolve(&shortened.code).await.unwrap().as_deref(),
            Some("https://example.com")
        );
    }

    #[tokio::test]
    async fn reserved_codes_are_skipped() {
        let service = ShortenerService::new(
            InMemoryStore::new(),
            ScriptedGenerator::new(vec!["health", "free"]),
        )
        .with_reserved(["health", "shorten"]);

        let shortened = service.shorten("https://example.com").await.unwrap();

        assert_eq!(shortened.code.as_str(), "free");
        assert!(service.resolve(&code("health")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn overwrite_policy_skips_reserved_codes() {
        let service = ShortenerService::with_policy(
            InMemoryStore::new(),
            ScriptedGenerator::new(vec!["health", "free"]),
            CollisionPolicy::Overwrite,
        )
        .with_reserved(["health"]);

        let shortened = service.shorten("https://example.com").await.unwrap();
        assert_eq!(shortened.code.as_str(), "free");
    }

    #[tokio::test]
    async fn only_reserved_codes_exhausts_retries() {
        let service = ShortenerService::with_policy(
            InMemoryStore::new(),
            ScriptedGenerator::new(vec!["health"]),
            CollisionPolicy::Retry { max_attempts: 2 },
        )
        .with_reserved(["health"]);

        assert_eq!(
            service.shorten("https://example.com").await,
            Err(ShortenerError::ExhaustedRetries { attempts: 2 })
        );
        assert!(service.store().is_empty());
    }

    #[tokio::test]
    async fn same_url_twice_gets_two_codes() {
        let service = ShortenerService::new(InMemoryStore::new(), RandomGenerator::default());

        let first = service.shorten("https://example.com").await.unwrap();
        let second = service.shorten("https://example.com").await.unwrap();

        assert_ne!(first.code, second.code);
        assert_eq!(service.store().len(), 2);
    }

    #[tokio::test]
    async fn collision_draws_a_new_code() {
        let store = InMemoryStore::new();
        store.put(&code("taken"), "https://other.example").await.unwrap();

        let service =
            ShortenerService::new(store, ScriptedGenerator::new(vec!["taken", "free"]));

        let shortened = service.shorten("https://example.com").await.unwrap();

        assert_eq!(shortened.code.as_str(), "free");
        assert_eq!(
            service.resolve(&code("taken")).await.unwrap().as_deref(),
            Some("https://other.example")
        );
    }

    #[tokio::test]
    async fn code_already_pointing_at_same_url_is_reused() {
        let store = InMemoryStore::new();
        store.put(&code("taken"), "https://example.com").await.unwrap();

        let service = ShortenerService::new(store, ScriptedGenerator::new(vec!["taken"]));

        let shortened = service.shorten("https://example.com").await.unwrap();
        assert_eq!(shortened.code.as_str(), "taken");
    }

    #[tokio::test]
    async fn saturated_code_space_exhausts_retries() {
        let store = InMemoryStore::new();
        store.put(&code("taken"), "https://other.example").await.unwrap();

        let service = ShortenerService::with_policy(
            store,
            ScriptedGenerator::new(vec!["taken"]),
            CollisionPolicy::Retry { max_attempts: 3 },
        );

        assert_eq!(
            service.shorten("https://example.com").await,
            Err(ShortenerError::ExhaustedRetries { attempts: 3 })
        );
        assert_eq!(
            service.resolve(&code("taken")).await.unwrap().as_deref(),
            Some("https://other.example")
        );
    }

    #[tokio::test]
    async fn overwrite_policy_replaces_existing_mapping() {
        let store = InMemoryStore::new();
        store.put(&code("taken"), "https://other.example").await.unwrap();

        let service = ShortenerService::with_policy(
            store,
            ScriptedGenerator::new(vec!["taken"]),
            CollisionPolicy::Overwrite,
        );

        let shortened = service.shorten("https://example.com").await.unwrap();

        assert_eq!(shortened.code.as_str(), "taken");
        assert_eq!(
            service.resolve(&code("taken")).await.unwrap().as_deref(),
            Some("https://example.com")
        );
    }

    #[tokio::test]
    async fn backend_failures_propagate_unchanged() {
        let service = ShortenerService::new(DownStore, RandomGenerator::default());

        let unavailable = ShortenerError::Storage(StorageError::Unavailable(
            "connection refused".into(),
        ));
        assert_eq!(service.shorten("https://example.com").await, Err(unavailable.clone()));
        assert_eq!(service.resolve(&code("abc123")).await, Err(unavailable));
        assert_eq!(service.backend(), Backend::Redis);
    }

    #[test]
    fn policy_from_max_attempts() {
        assert_eq!(CollisionPolicy::from_max_attempts(0), CollisionPolicy::Overwrite);
        assert_eq!(CollisionPolicy::from_max_attempts(1), CollisionPolicy::Overwrite);
        assert_eq!(
            CollisionPolicy::from_max_attempts(4),
            CollisionPolicy::Retry { max_attempts: 4 }
        );
        assert_eq!(
            CollisionPolicy::default(),
            CollisionPolicy::Retry {
                max_attempts: DEFAULT_MAX_ATTEMPTS
            }
        );
    }
}
