use bson::{doc, oid::ObjectId, Bson};
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;
use tracing::info;

use crate::models::{fields, News};
use crate::service::storage::{MongoStore, StoreError};

const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, Error)]
pub enum NewsStoreError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
    #[error("failed to encode news: {0}")]
    Encode(#[from] bson::ser::Error),
    #[error("failed to decode news document: {0}")]
    Decode(#[from] bson::de::Error),
    #[error("news with id {0} already exists")]
    Duplicate(ObjectId),
    #[error("store returned a non-ObjectId identifier: {0}")]
    UnexpectedId(Bson),
}

/// Insert a headline and record the identifier the store assigned to it.
pub async fn insert(store: &MongoStore, news: &mut News) -> Result<ObjectId, NewsStoreError> {
    let document = news.to_document()?;
    let result = match store.news().insert_one(document).await {
        Ok(result) => result,
        Err(err) if is_duplicate_key(&err) => {
            return Err(match news.id() {
                Some(id) => NewsStoreError::Duplicate(id),
                None => err.into(),
            });
        }
        Err(err) => return Err(err.into()),
    };

    let id = match result.inserted_id {
        Bson::ObjectId(id) => id,
        other => return Err(NewsStoreError::UnexpectedId(other)),
    };
    news.assign_id(id);
    info!(%id, title = %news.title, "inserted news");
    Ok(id)
}

pub async fn find_by_id(store: &MongoStore, id: ObjectId) -> Result<Option<News>, NewsStoreError> {
    store
        .news()
        .find_one(doc! { fields::ID: id })
        .await?
        .map(News::from_document)
        .transpose()
        .map_err(Into::into)
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY_CODE
    )
}
