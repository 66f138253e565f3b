use crate::telemetry::LogFormat;
use clap::Parser;
use shortcut_generator::DEFAULT_LENGTH;
use shortcut_shortener::{CollisionPolicy, DEFAULT_MAX_ATTEMPTS};
use shortcut_storage::config::DEFAULT_TIMEOUT;
use shortcut_storage::StorageSettings;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

pub const MONGO_URI_ENV: &str = "MONGO_URI";
pub const MONGO_DATABASE_ENV: &str = "MONGO_DATABASE";
pub const MONGO_COLLECTION_ENV: &str = "MONGO_COLLECTION";
pub const REDIS_HOST_ENV: &str = "REDIS_HOST";
pub const REDIS_PORT_ENV: &str = "REDIS_PORT";
pub const REDIS_KEY_PREFIX_ENV: &str = "REDIS_KEY_PREFIX";
pub const BACKEND_TIMEOUT_MS_ENV: &str = "BACKEND_TIMEOUT_MS";
pub const BIND_ADDR_ENV: &str = "BIND_ADDR";
pub const PORT_ENV: &str = "PORT";
pub const PUBLIC_BASE_URL_ENV: &str = "PUBLIC_BASE_URL";
pub const SHORT_CODE_LENGTH_ENV: &str = "SHORT_CODE_LENGTH";
pub const SHORTEN_MAX_ATTEMPTS_ENV: &str = "SHORTEN_MAX_ATTEMPTS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BACKEND_TIMEOUT_MS: u64 = DEFAULT_TIMEOUT.as_millis() as u64;

#[derive(Debug, Parser)]
#[command(name = "shortcut", about = "A small URL shortener")]
pub struct Cli {
    /// Selects the MongoDB backend.
    #[arg(long, env = MONGO_URI_ENV)]
    pub mongo_uri: Option<String>,

    #[arg(long, env = MONGO_DATABASE_ENV, default_value = shortcut_storage::mongo::DEFAULT_DATABASE)]
    pub mongo_database: String,

    #[arg(long, env = MONGO_COLLECTION_ENV, default_value = shortcut_storage::mongo::DEFAULT_COLLECTION)]
    pub mongo_collection: String,

    /// Selects the Redis backend unless a MongoDB URI is set.
    #[arg(long, env = REDIS_HOST_ENV)]
    pub redis_host: Option<String>,

    #[arg(long, env = REDIS_PORT_ENV, default_value_t = shortcut_storage::config::DEFAULT_REDIS_PORT)]
    pub redis_port: u16,

    #[arg(long, env = REDIS_KEY_PREFIX_ENV, default_value = "")]
    pub redis_key_prefix: String,

    /// Upper bound for a single backend call, in milliseconds.
    #[arg(long, env = BACKEND_TIMEOUT_MS_ENV, default_value_t = DEFAULT_BACKEND_TIMEOUT_MS)]
    pub backend_timeout_ms: u64,

    #[arg(long, env = BIND_ADDR_ENV, default_value = DEFAULT_BIND_ADDR)]
    pub bind_addr: IpAddr,

    #[arg(long, env = PORT_ENV, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Prefix for returned short URLs instead of `http://<Host header>`.
    #[arg(long, env = PUBLIC_BASE_URL_ENV)]
    pub public_base_url: Option<String>,

    #[arg(long, env = SHORT_CODE_LENGTH_ENV, default_value_t = DEFAULT_LENGTH)]
    pub code_length: usize,

    /// Codes drawn per request before giving up; 1 disables collision checks.
    #[arg(long, env = SHORTEN_MAX_ATTEMPTS_ENV, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Cli {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_millis(self.backend_timeout_ms)
    }

    pub fn storage_settings(&self) -> StorageSettings {
        StorageSettings::builder()
            .mongo_uri(self.mongo_uri.clone())
            .mongo_database(self.mongo_database.clone())
            .mongo_collection(self.mongo_collection.clone())
            .redis_host(self.redis_host.clone())
            .redis_port(self.redis_port)
            .redis_key_prefix(self.redis_key_prefix.clone())
            .timeout(self.backend_timeout())
            .build()
    }

    pub fn collision_policy(&self) -> CollisionPolicy {
        CollisionPolicy::from_max_attempts(self.max_attempts)
    }
}
