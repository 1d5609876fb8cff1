pub mod store;

#[cfg(test)]
pub mod memory;

pub use store::{FindQuery, Store};

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::error::{ErrorKind, WriteError, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection, Database, IndexModel};
use std::error::Error;
use std::time::Duration;

use crate::models::{DeleteAck, InsertAck, UpdateAck};
use crate::utils::{json::bson_to_json, AppError};

pub const REVIEWS: &str = "reviews";
pub const USERS: &str = "users";
pub const WATCHLIST: &str = "watchList";

const DUPLICATE_KEY: i32 = 11000;

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    /// Builds the client. No round-trip to the server happens here except
    /// the DNS lookup for `mongodb+srv` URIs; see [`MongoDB::ping`].
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = ClientOptions::parse(uri).await?;

        client_options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        Ok(Self { client, db })
    }

    /// Runs `{ping: 1}` against the admin database.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    /// Unique (userEmail, title) index backing `insert_if_absent` on the watchlist.
    pub async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        log::info!("🔧 Creating database indexes...");

        let watchlist = self.collection(WATCHLIST);

        let keys = doc! { "userEmail": 1, "title": 1 };
        let watchlist_index = IndexModel::builder()
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name(key_index_name(&keys))
                    .build(),
            )
            .keys(keys)
            .build();

        match watchlist.create_index(watchlist_index).await {
            Ok(_) => log::info!("   ✅ Index ready: {}(userEmail, title) unique", WATCHLIST),
            Err(e) => {
                log::warn!("   ⚠️  Could not create {} index: {}", WATCHLIST, e);
                return Err(e.into());
            }
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }
}

/// Name the server gives an ascending index over `key`, e.g. `userEmail_1_title_1`.
pub fn key_index_name(key: &Document) -> String {
    key.keys()
        .map(|field| format!("{}_1", field))
        .collect::<Vec<_>>()
        .join("_")
}

/// `$setOnInsert` payload for an upsert keyed on `key`. Key fields are left out
/// because the server copies them from the filter; an `_id` is generated when
/// the caller did not supply one.
pub fn set_on_insert(key: &Document, document: Document) -> Document {
    let mut on_insert: Document = document
        .into_iter()
        .filter(|(field, _)| !key.contains_key(field))
        .collect();
    if !on_insert.contains_key("_id") {
        on_insert.insert("_id", ObjectId::new());
    }
    on_insert
}

/// True only for a duplicate-key failure on the named index. A clash on
/// `_id` or any other unique index is a real error.
fn is_duplicate_on(e: &mongodb::error::Error, index: &str) -> bool {
    match e.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(we)) => violates_index(we, index),
        _ => false,
    }
}

fn violates_index(we: &WriteError, index: &str) -> bool {
    we.code == DUPLICATE_KEY && we.message.contains(&format!("index: {} ", index))
}

#[async_trait]
impl Store for MongoDB {
    async fn insert_one(&self, collection: &str, document: Document) -> Result<InsertAck, AppError> {
        let result = self.collection(collection).insert_one(document).await?;
        Ok(result.into())
    }

    async fn find(&self, collection: &str, query: FindQuery) -> Result<Vec<Document>, AppError> {
        let coll = self.collection(collection);
        let mut action = coll.find(query.filter);

        if let Some(field) = query.sort_desc {
            let mut sort = Document::new();
            sort.insert(field, -1);
            action = action.sort(sort);
        }
        if let Some(limit) = query.limit {
            action = action.limit(limit);
        }

        let cursor = action.await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, AppError> {
        Ok(self.collection(collection).find_one(filter).await?)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateAck, AppError> {
        let result = self
            .collection(collection)
            .update_one(filter, doc! { "$set": set })
            .upsert(upsert)
            .await?;
        Ok(result.into())
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<DeleteAck, AppError> {
        let result = self.collection(collection).delete_one(filter).await?;
        Ok(result.into())
    }

    async fn insert_if_absent(
        &self,
        collection: &str,
        key: Document,
        document: Document,
    ) -> Result<Option<InsertAck>, AppError> {
        let index = key_index_name(&key);
        let on_insert = set_on_insert(&key, document);

        let outcome = self
            .collection(collection)
            .update_one(key, doc! { "$setOnInsert": on_insert })
            .upsert(true)
            .await;

        match outcome {
            Ok(result) => Ok(result.upserted_id.map(|id| InsertAck {
                acknowledged: true,
                inserted_id: bson_to_json(id),
            })),
            // Lost a race against an identical request; the unique index held.
            Err(e) if is_duplicate_on(&e, &index) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
