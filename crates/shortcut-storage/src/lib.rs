//! Mapping store backends for Shortcut.
//!
//! Three interchangeable [`MappingStore`] implementations live here:
//! [`MongoStore`], [`RedisStore`] and [`InMemoryStore`]. Which one a process
//! uses is decided once at startup by [`StorageSettings::selection`] and
//! [`connect`], which hands back an [`AnyStore`].
//!
//! ```rust,no_run
//! use shortcut_core::{MappingStore, ShortCode};
//! use shortcut_storage::{connect, StorageSettings};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = StorageSettings::builder()
//!     .redis_host(Some("127.0.0.1".to_string()))
//!     .build();
//! let store = connect(settings.selection()).await?;
//!
//! let code = ShortCode::new("abc123")?;
//! store.put(&code, "https://example.com").await?;
//! assert_eq!(store.get(&code).await?.as_deref(), Some("https://example.com"));
//! # Ok(())
//! # }
//! ```

pub mod any;
pub mod config;
pub mod memory;
pub mod mongo;
pub mod redis;
pub mod timeout;

pub use any::{connect, AnyStore};
pub use config::{BackendSelection, StorageSettings};
pub use memory::InMemoryStore;
pub use mongo::MongoStore;
pub use crate::redis::RedisStore;
pub use shortcut_core::{Backend, MappingStore, StorageError};
pub use timeout::TimeoutStore;
