use bson::{oid::ObjectId, Bson, Document};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Persisted document keys, for filters.
pub mod fields {
    pub const ID: &str = "_id";
    pub const TITLE: &str = "title";
    pub const DATE: &str = "date";
}

/// One headline as stored in the news collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct News {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    #[serde(rename = "title")]
    pub title: String,
    #[serde(
        rename = "date",
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    date: DateTime<Utc>,
}

impl News {
    /// Build an unsaved record. The date is truncated to milliseconds, the
    /// precision of a BSON datetime.
    pub fn new(title: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: None,
            title: title.into(),
            date: date.trunc_subsecs(3),
        }
    }

    /// Identifier assigned by the store; `None` until persisted.
    pub fn id(&self) -> Option<ObjectId> {
        self.id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Truncated to milliseconds like `new`.
    pub fn set_date(&mut self, date: DateTime<Utc>) {
        self.date = date.trunc_subsecs(3);
    }

    /// Set the identifier once. Returns false if one was already assigned.
    pub(crate) fn assign_id(&mut self, id: ObjectId) -> bool {
        if self.id.is_some() {
            return false;
        }
        self.id = Some(id);
        true
    }

    pub fn to_document(&self) -> Result<Document, bson::ser::Error> {
        bson::to_document(self)
    }

    pub fn from_document(doc: Document) -> Result<Self, bson::de::Error> {
        bson::from_document(doc)
    }

    /// Relaxed extended JSON, e.g. `{"_id": {"$oid": ..}, "date": {"$date": "2024-03-05T00:00:00Z"}}`.
    pub fn to_relaxed_json(&self) -> Result<serde_json::Value, bson::ser::Error> {
        Ok(Bson::Document(self.to_document()?).into_relaxed_extjson())
    }
}
