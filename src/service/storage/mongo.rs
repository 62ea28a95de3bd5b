use std::env;

use bson::{doc, Document};
use mongodb::{Client, Collection, Database};
use thiserror::Error;
use tracing::info;

pub const DEFAULT_DATABASE: &str = "crypto_news";
pub const DEFAULT_COLLECTION: &str = "news";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("mongodb uri not set (MONGODB_URI)")]
    MissingUri,
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl StoreConfig {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }

    pub fn from_env() -> Result<Self, StoreError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StoreError> {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let uri = read("MONGODB_URI").ok_or(StoreError::MissingUri)?;
        Ok(Self {
            uri,
            database: read("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            collection: read("MONGODB_COLLECTION")
                .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
        })
    }
}

#[derive(Clone)]
pub struct MongoStore {
    database: Database,
    collection: String,
}

impl MongoStore {
    pub async fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&config.uri).await?;
        let database = client.database(&config.database);
        database.run_command(doc! { "ping": 1 }).await?;
        info!(
            database = %config.database,
            collection = %config.collection,
            "connected to mongodb"
        );
        Ok(Self {
            database,
            collection: config.collection.clone(),
        })
    }

    pub async fn from_env() -> Result<Self, StoreError> {
        let config = StoreConfig::from_env()?;
        Self::new(&config).await
    }

    /// Raw documents of the news collection; decoding is left to the caller.
    pub fn news(&self) -> Collection<Document> {
        self.database.collection(&self.collection)
    }
}
