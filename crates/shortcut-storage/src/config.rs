use crate::mongo::{DEFAULT_COLLECTION, DEFAULT_DATABASE};
use shortcut_core::Backend;
use std::time::Duration;
use typed_builder::TypedBuilder;

pub const DEFAULT_REDIS_PORT: u16 = 6379;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Everything the storage layer reads from the environment.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct StorageSettings {
    #[builder(default)]
    pub mongo_uri: Option<String>,
    #[builder(default = DEFAULT_DATABASE.to_string())]
    pub mongo_database: String,
    #[builder(default = DEFAULT_COLLECTION.to_string())]
    pub mongo_collection: String,
    #[builder(default)]
    pub redis_host: Option<String>,
    #[builder(default = DEFAULT_REDIS_PORT)]
    pub redis_port: u16,
    #[builder(default)]
    pub redis_key_prefix: String,
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
}

/// The backend a process will use, with the settings that backend needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendSelection {
    MongoDb {
        uri: String,
        database: String,
        collection: String,
        timeout: Duration,
    },
    Redis {
        host: String,
        port: u16,
        key_prefix: String,
        timeout: Duration,
    },
    InMemory,
}

impl BackendSelection {
    pub fn backend(&self) -> Backend {
        match self {
            BackendSelection::MongoDb { .. } => Backend::MongoDb,
            BackendSelection::Redis { .. } => Backend::Redis,
            BackendSelection::InMemory => Backend::InMemory,
        }
    }
}

/// Blank values count as unset, like an exported but empty variable.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl StorageSettings {
    /// Picks the backend: MongoDB if a URI is configured, otherwise Redis if a
    /// host is configured, otherwise process memory.
    pub fn selection(&self) -> BackendSelection {
        if let Some(uri) = present(&self.mongo_uri) {
            return BackendSelection::MongoDb {
                uri: uri.to_string(),
                database: self.mongo_database.clone(),
                collection: self.mongo_collection.clone(),
                timeout: self.timeout,
            };
        }

        if let Some(host) = present(&self.redis_host) {
            return BackendSelection::Redis {
                host: host.to_string(),
                port: self.redis_port,
                key_prefix: self.redis_key_prefix.clone(),
                timeout: self.timeout,
            };
        }

        BackendSelection::InMemory
    }
}
