// ==================== WATCHLIST ====================
// One entry per (userEmail, title). The insert is conditional and atomic at
// the store level, so two identical concurrent requests still store one item.

use mongodb::bson::{doc, Bson, Document};
use serde_json::Value;

use crate::{
    database::{FindQuery, Store, WATCHLIST},
    models::{watchlist::KEY_FIELDS, DeleteAck, WatchlistResponse},
    services::email_filter,
    utils::{
        json::{body_to_document, documents_to_json, parse_object_id},
        AppError,
    },
};

/// POST /watchList - Adds the item unless the user already has that title
pub async fn add_to_watchlist(db: &dyn Store, body: Value) -> Result<WatchlistResponse, AppError> {
    let item = body_to_document(body)?;
    let key: Document = KEY_FIELDS
        .iter()
        .map(|field| (field.to_string(), item.get(*field).cloned().unwrap_or(Bson::Null)))
        .collect();

    match db.insert_if_absent(WATCHLIST, key, item).await? {
        Some(result) => Ok(WatchlistResponse::added(result)),
        None => {
            log::info!("ℹ️  Watchlist entry already present, skipping insert");
            Ok(WatchlistResponse::already_present())
        }
    }
}

pub async fn watchlist_by_email(db: &dyn Store, email: Option<String>) -> Result<Vec<Value>, AppError> {
    let items = db.find(WATCHLIST, FindQuery::filter(email_filter(email))).await?;
    Ok(documents_to_json(items))
}

pub async fn delete_watchlist_item(db: &dyn Store, id: &str) -> Result<DeleteAck, AppError> {
    let object_id = parse_object_id(id)?;
    db.delete_one(WATCHLIST, doc! { "_id": object_id }).await
}
