use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::error::ErrorKind;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, IndexModel};
use shortcut_core::error::Result;
use shortcut_core::{Backend, Mapping, MappingStore, ShortCode, StorageError};
use std::time::Duration;
use tracing::{debug, trace, warn};

pub const DEFAULT_DATABASE: &str = "url_shortener";
pub const DEFAULT_COLLECTION: &str = "urls";

/// A MongoDB-backed mapping store.
///
/// All mappings live in one collection as `{ short_code, long_url }`
/// documents. Lookups filter on `short_code`, and puts are upserts filtered on
/// the same field, so a code never owns more than one document.
#[derive(Debug, Clone)]
pub struct MongoStore {
    collection: Collection<Mapping>,
}

pub(crate) fn map_mongo_error(operation: &str, err: mongodb::error::Error) -> StorageError {
    let message = format!("{operation}: {err}");

    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::DnsResolve { .. } => StorageError::Unavailable(message),
        ErrorKind::BsonDeserialization(_) => StorageError::InvalidData(message),
        ErrorKind::InvalidArgument { .. } => StorageError::Operation(message),
        _ => StorageError::Query(message),
    }
}

impl MongoStore {
    /// Creates a store from an existing collection handle.
    pub fn new(collection: Collection<Mapping>) -> Self {
        Self { collection }
    }

    /// Connects to MongoDB and prepares the mapping collection.
    ///
    /// `timeout` caps server selection and connection establishment, so an
    /// unreachable server fails calls instead of stalling them.
    pub async fn connect(
        uri: &str,
        database: &str,
        collection: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| map_mongo_error("invalid mongodb uri", e))?;
        options.server_selection_timeout = Some(timeout);
        options.connect_timeout = Some(timeout);
        options
            .app_name
            .get_or_insert_with(|| "shortcut".to_string());

        let client =
            Client::with_options(options).map_err(|e| map_mongo_error("invalid mongodb options", e))?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| map_mongo_error("failed to reach mongodb", e))?;

        let store = Self::new(db.collection(collection));
        store.ensure_indexes().await;

        debug!(database, collection, "connected to mongodb");
        Ok(store)
    }

    /// Returns a reference to the underlying collection.
    pub fn collection(&self) -> &Collection<Mapping> {
        &self.collection
    }

    /// Creates the unique index on `short_code`.
    ///
    /// Failure is logged and tolerated; upserts keep codes unique on their own.
    async fn ensure_indexes(&self) {
        let options = IndexOptions::builder().unique(true).build();
        let model = IndexModel::builder()
            .keys(doc! { "short_code": 1 })
            .options(options)
            .build();

        if let Err(e) = self.collection.create_index(model).await {
            warn!(error = %e, "failed to create short_code index");
        }
    }
}

#[async_trait]
impl MappingStore for MongoStore {
    async fn put(&self, code: &ShortCode, url: &str) -> Result<()> {
        trace!(code = %code, "upserting mapping in mongodb");

        self.collection
            .update_one(
                doc! { "short_code": code.as_str() },
                doc! { "$set": { "long_url": url } },
            )
            .upsert(true)
            .await
            .map(|_| ())
            .map_err(|e| {
                warn!(code = %code, error = %e, "mongodb error on upsert");
                map_mongo_error("failed to upsert mapping", e)
            })
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        trace!(code = %code, "fetching mapping from mongodb");

        match self
            .collection
            .find_one(doc! { "short_code": code.as_str() })
            .await
        {
            Ok(Some(mapping)) => {
                debug!(code = %code, "mongodb hit");
                Ok(Some(mapping.long_url))
            }
            Ok(None) => {
                trace!(code = %code, "mongodb miss");
                Ok(None)
            }
            Err(e) => {
                warn!(code = %code, error = %e, "mongodb error on find");
                Err(map_mongo_error("failed to fetch mapping", e))
            }
        }
    }

    fn backend(&self) -> Backend {
        Backend::MongoDb
    }
}
