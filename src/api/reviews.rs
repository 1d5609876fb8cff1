use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::{
    database::Store,
    models::{DeleteAck, EmailQuery, InsertAck, Review, ReviewInput, UpdateAck},
    services::review_service,
    utils::AppError,
};

#[utoipa::path(
    post,
    path = "/review",
    tag = "Reviews",
    request_body = ReviewInput,
    responses(
        (status = 200, description = "Review stored; rating and year coerced to numbers", body = InsertAck),
        (status = 400, description = "Body is not a JSON object"),
        (status = 500, description = "Database error")
    )
)]
pub async fn create_review(
    db: web::Data<dyn Store>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /review - Creating review");

    let result = review_service::create_review(db.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/reviews",
    tag = "Reviews",
    responses(
        (status = 200, description = "Every review in natural order", body = Vec<Review>),
        (status = 500, description = "Database error")
    )
)]
pub async fn list_reviews(db: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let reviews = review_service::list_reviews(db.get_ref()).await?;
    log::info!("📋 GET /reviews - {} reviews", reviews.len());
    Ok(HttpResponse::Ok().json(reviews))
}

#[utoipa::path(
    get,
    path = "/my-review",
    tag = "Reviews",
    params(EmailQuery),
    responses(
        (status = 200, description = "Reviews written by the given email", body = Vec<Review>),
        (status = 500, description = "Database error")
    )
)]
pub async fn my_reviews(
    db: web::Data<dyn Store>,
    query: web::Query<EmailQuery>,
) -> Result<HttpResponse, AppError> {
    let email = query.into_inner().email;
    log::info!("📋 GET /my-review - email={:?}", email);

    let reviews = review_service::reviews_by_email(db.get_ref(), email).await?;
    Ok(HttpResponse::Ok().json(reviews))
}

#[utoipa::path(
    get,
    path = "/review/{id}",
    tag = "Reviews",
    params(("id" = String, Path, description = "Review ObjectId (24 hex chars)")),
    responses(
        (status = 200, description = "The review, or null when no review has this id", body = Review),
        (status = 400, description = "Malformed id"),
        (status = 500, description = "Database error")
    )
)]
pub async fn get_review(
    db: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("🔍 GET /review/{}", id);

    let review = review_service::get_review(db.get_ref(), &id).await?;
    Ok(HttpResponse::Ok().json(review))
}

#[utoipa::path(
    delete,
    path = "/review/{id}",
    tag = "Reviews",
    params(("id" = String, Path, description = "Review ObjectId (24 hex chars)")),
    responses(
        (status = 200, description = "deletedCount is 0 when nothing matched", body = DeleteAck),
        (status = 400, description = "Malformed id"),
        (status = 500, description = "Database error")
    )
)]
pub async fn delete_review(
    db: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("🗑️  DELETE /review/{}", id);

    let result = review_service::delete_review(db.get_ref(), &id).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    put,
    path = "/review/{id}",
    tag = "Reviews",
    params(("id" = String, Path, description = "Review ObjectId (24 hex chars)")),
    request_body = ReviewInput,
    responses(
        (status = 200, description = "coverUrl, title, description, rating, year and genre overwritten", body = UpdateAck),
        (status = 400, description = "Malformed id or body"),
        (status = 500, description = "Database error")
    )
)]
pub async fn update_review(
    db: web::Data<dyn Store>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("🔧 PUT /review/{}", id);

    let result = review_service::update_review(db.get_ref(), &id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/top-rated",
    tag = "Reviews",
    responses(
        (status = 200, description = "Up to six reviews, highest rating first", body = Vec<Review>),
        (status = 500, description = "Database error")
    )
)]
pub async fn top_rated(db: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    log::info!("🏆 GET /top-rated");

    let reviews = review_service::top_rated(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(reviews))
}
