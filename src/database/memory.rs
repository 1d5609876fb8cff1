// In-process document store used by the handler and service tests.

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;

use super::store::{FindQuery, Store};
use crate::models::{DeleteAck, InsertAck, UpdateAck};
use crate::utils::{json::bson_to_json, AppError};

#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    offline: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails, like a server that never came up.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    /// Snapshot of a collection in insertion order.
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.lock().get(collection).cloned().unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<Document>>> {
        self.collections.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_online(&self) -> Result<(), AppError> {
        if self.offline {
            return Err(AppError::DatabaseError("server selection timeout".into()));
        }
        Ok(())
    }
}

fn with_id(document: Document) -> (Bson, Document) {
    if let Some(id) = document.get("_id") {
        return (id.clone(), document);
    }
    let id = Bson::ObjectId(ObjectId::new());
    let mut stored = Document::new();
    stored.insert("_id", id.clone());
    for (field, value) in document {
        stored.insert(field, value);
    }
    (id, stored)
}

fn as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(i) => Some(*i as f64),
        Bson::Int64(i) => Some(*i as f64),
        Bson::Double(f) => Some(*f),
        _ => None,
    }
}

fn values_equal(a: &Bson, b: &Bson) -> bool {
    match (as_f64(a), as_f64(b)) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(field, expected)| match document.get(field) {
        Some(found) => values_equal(found, expected),
        None => expected == &Bson::Null,
    })
}

// Cross-type order used by the server: missing/null < numbers < strings < rest.
// NaN sorts below every other number.
fn compare(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    fn rank(v: Option<&Bson>) -> u8 {
        match v {
            None | Some(Bson::Null) => 0,
            Some(v) if as_f64(v).is_some() => 1,
            Some(Bson::String(_)) => 2,
            Some(_) => 3,
        }
    }

    match rank(a).cmp(&rank(b)) {
        Ordering::Equal => {}
        other => return other,
    }

    match (a, b) {
        (Some(Bson::String(x)), Some(Bson::String(y))) => x.cmp(y),
        (Some(x), Some(y)) => match (as_f64(x), as_f64(y)) {
            (Some(x), Some(y)) => match (x.is_nan(), y.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                (false, false) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            },
            _ => Ordering::Equal,
        },
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_one(&self, collection: &str, document: Document) -> Result<InsertAck, AppError> {
        self.check_online()?;
        let (id, stored) = with_id(document);
        self.lock().entry(collection.to_string()).or_default().push(stored);
        Ok(InsertAck {
            acknowledged: true,
            inserted_id: bson_to_json(id),
        })
    }

    async fn find(&self, collection: &str, query: FindQuery) -> Result<Vec<Document>, AppError> {
        self.check_online()?;
        let mut found: Vec<Document> = self
            .lock()
            .get(collection)
            .map(|docs| docs.iter().filter(|d| matches_filter(d, &query.filter)).cloned().collect())
            .unwrap_or_default();

        if let Some(field) = &query.sort_desc {
            found.sort_by(|a, b| compare(b.get(field), a.get(field)));
        }
        if let Some(limit) = query.limit {
            found.truncate(limit.max(0) as usize);
        }
        Ok(found)
    }

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, AppError> {
        self.check_online()?;
        Ok(self
            .lock()
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| matches_filter(d, &filter)).cloned()))
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateAck, AppError> {
        self.check_online()?;
        let mut collections = self.lock();
        let docs = collections.entry(collection.to_string()).or_default();

        if let Some(existing) = docs.iter_mut().find(|d| matches_filter(d, &filter)) {
            let mut modified = false;
            for (field, value) in set {
                if existing.get(&field) != Some(&value) {
                    modified = true;
                }
                existing.insert(field, value);
            }
            return Ok(UpdateAck {
                acknowledged: true,
                matched_count: 1,
                modified_count: u64::from(modified),
                upserted_count: 0,
                upserted_id: None,
            });
        }

        if !upsert {
            return Ok(UpdateAck {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
                upserted_count: 0,
                upserted_id: None,
            });
        }

        let mut seed = filter;
        for (field, value) in set {
            seed.insert(field, value);
        }
        let (id, stored) = with_id(seed);
        docs.push(stored);

        Ok(UpdateAck {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 1,
            upserted_id: Some(bson_to_json(id)),
        })
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<DeleteAck, AppError> {
        self.check_online()?;
        let mut collections = self.lock();
        let deleted = match collections.get_mut(collection) {
            Some(docs) => match docs.iter().position(|d| matches_filter(d, &filter)) {
                Some(index) => {
                    docs.remove(index);
                    1
                }
                None => 0,
            },
            None => 0,
        };
        Ok(DeleteAck {
            acknowledged: true,
            deleted_count: deleted,
        })
    }

    async fn insert_if_absent(
        &self,
        collection: &str,
        key: Document,
        document: Document,
    ) -> Result<Option<InsertAck>, AppError> {
        self.check_online()?;
        let mut collections = self.lock();
        let docs = collections.entry(collection.to_string()).or_default();

        if docs.iter().any(|d| matches_filter(d, &key)) {
            return Ok(None);
        }

        let on_insert = super::set_on_insert(&key, document);
        let mut seed = key;
        for (field, value) in on_insert {
            seed.insert(field, value);
        }
        let (id, stored) = with_id(seed);
        docs.push(stored);

        Ok(Some(InsertAck {
            acknowledged: true,
            inserted_id: bson_to_json(id),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn test_null_filter_matches_missing_field() {
        let store = MemoryStore::new();
        store.insert_one("c", doc! { "title": "a" }).await.unwrap();
        store.insert_one("c", doc! { "title": "b", "userEmail": "x@y.z" }).await.unwrap();

        let found = store
            .find("c", FindQuery::filter(doc! { "userEmail": Bson::Null }))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get_str("title").unwrap(), "a");
    }

    #[tokio::test]
    async fn test_descending_sort_orders_mixed_numbers() {
        let store = MemoryStore::new();
        store.insert_one("c", doc! { "rating": 7 }).await.unwrap();
        store.insert_one("c", doc! { "rating": f64::NAN }).await.unwrap();
        store.insert_one("c", doc! { "rating": 9.5 }).await.unwrap();
        store.insert_one("c", doc! { "other": 1 }).await.unwrap();

        let found = store
            .find("c", FindQuery::all().sort_desc("rating").limit(3))
            .await
            .unwrap();
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].get_f64("rating").unwrap(), 9.5);
        assert_eq!(found[1].get_i32("rating").unwrap(), 7);
        assert!(found[2].get_f64("rating").unwrap().is_nan());
    }

    #[tokio::test]
    async fn test_offline_store_fails_every_call() {
        let store = MemoryStore::offline();
        assert!(matches!(
            store.find("c", FindQuery::all()).await,
            Err(AppError::DatabaseError(_))
        ));
    }
}
