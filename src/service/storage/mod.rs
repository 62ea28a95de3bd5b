pub mod collections;
mod mongo;

pub use mongo::{MongoStore, StoreConfig, StoreError, DEFAULT_COLLECTION, DEFAULT_DATABASE};
