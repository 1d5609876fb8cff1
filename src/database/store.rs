use async_trait::async_trait;
use mongodb::bson::Document;

use crate::models::{DeleteAck, InsertAck, UpdateAck};
use crate::utils::AppError;

/// Read query over one collection: equality filter, optional descending
/// sort on a single field, optional limit.
#[derive(Debug, Clone, Default)]
pub struct FindQuery {
    pub filter: Document,
    pub sort_desc: Option<String>,
    pub limit: Option<i64>,
}

impl FindQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filter(filter: Document) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn sort_desc(mut self, field: &str) -> Self {
        self.sort_desc = Some(field.to_string());
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Single-document operations the routes are built from.
///
/// Filters are plain equality documents. A `null` filter value matches
/// documents where the field is null or missing.
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_one(&self, collection: &str, document: Document) -> Result<InsertAck, AppError>;

    async fn find(&self, collection: &str, query: FindQuery) -> Result<Vec<Document>, AppError>;

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, AppError>;

    /// `$set` on the first match. With `upsert`, inserts the filter fields
    /// plus `set` when nothing matches.
    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateAck, AppError>;

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<DeleteAck, AppError>;

    /// Atomically inserts `document` unless a document matching `key` exists.
    /// Returns `None` when the key was already taken.
    async fn insert_if_absent(
        &self,
        collection: &str,
        key: Document,
        document: Document,
    ) -> Result<Option<InsertAck>, AppError>;
}
