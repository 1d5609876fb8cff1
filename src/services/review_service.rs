// ==================== REVIEWS ====================
// Request-to-persistence mapping for the `reviews` collection.
// `rating` and `year` are always coerced to numbers before they are written.

use mongodb::bson::{doc, Bson, Document};
use serde_json::Value;

use crate::{
    database::{FindQuery, Store, REVIEWS},
    models::{review::{NUMERIC_FIELDS, TOP_RATED_LIMIT, UPDATABLE_FIELDS}, DeleteAck, InsertAck, UpdateAck},
    services::email_filter,
    utils::{
        coerce::to_number_bson,
        json::{body_to_document, document_to_json, documents_to_json, json_to_bson, parse_object_id},
        AppError,
    },
};

/// POST /review - Stores the body as a new review
pub async fn create_review(db: &dyn Store, body: Value) -> Result<InsertAck, AppError> {
    let rating = to_number_bson(body.get("rating"));
    let year = to_number_bson(body.get("year"));

    let mut review = body_to_document(body)?;
    review.insert("rating", rating);
    review.insert("year", year);

    db.insert_one(REVIEWS, review).await
}

pub async fn list_reviews(db: &dyn Store) -> Result<Vec<Value>, AppError> {
    let reviews = db.find(REVIEWS, FindQuery::all()).await?;
    Ok(documents_to_json(reviews))
}

/// GET /my-review?email= - Reviews whose `userEmail` equals the given email
pub async fn reviews_by_email(db: &dyn Store, email: Option<String>) -> Result<Vec<Value>, AppError> {
    let reviews = db.find(REVIEWS, FindQuery::filter(email_filter(email))).await?;
    Ok(documents_to_json(reviews))
}

/// GET /review/{id} - `None` when no review has that id
pub async fn get_review(db: &dyn Store, id: &str) -> Result<Option<Value>, AppError> {
    let object_id = parse_object_id(id)?;
    let review = db.find_one(REVIEWS, doc! { "_id": object_id }).await?;
    Ok(review.map(document_to_json))
}

pub async fn delete_review(db: &dyn Store, id: &str) -> Result<DeleteAck, AppError> {
    let object_id = parse_object_id(id)?;
    db.delete_one(REVIEWS, doc! { "_id": object_id }).await
}

/// PUT /review/{id} - Rewrites the fixed field set, leaving other fields alone
pub async fn update_review(db: &dyn Store, id: &str, body: Value) -> Result<UpdateAck, AppError> {
    let object_id = parse_object_id(id)?;
    if !body.is_object() {
        return Err(AppError::InvalidRequest("expected a JSON object body".into()));
    }

    db.update_one(REVIEWS, doc! { "_id": object_id }, review_update(&body), false)
        .await
}

fn review_update(body: &Value) -> Document {
    let mut set = Document::new();
    for field in UPDATABLE_FIELDS {
        let value = if NUMERIC_FIELDS.contains(&field) {
            to_number_bson(body.get(field))
        } else {
            body.get(field).cloned().map(json_to_bson).unwrap_or(Bson::Null)
        };
        set.insert(field, value);
    }
    set
}

/// GET /top-rated - Highest `rating` first, at most six
pub async fn top_rated(db: &dyn Store) -> Result<Vec<Value>, AppError> {
    let query = FindQuery::all().sort_desc("rating").limit(TOP_RATED_LIMIT);
    let reviews = db.find(REVIEWS, query).await?;
    Ok(documents_to_json(reviews))
}
