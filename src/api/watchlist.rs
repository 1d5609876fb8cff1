use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::{
    database::Store,
    models::{DeleteAck, EmailQuery, WatchlistItemInput, WatchlistResponse},
    services::watchlist_service,
    utils::AppError,
};

/// POST /watchList - Adds an item; duplicates come back as `success: false`
#[utoipa::path(
    post,
    path = "/watchList",
    tag = "Watchlist",
    request_body = WatchlistItemInput,
    responses(
        (status = 200, description = "success is false when the user already has this title", body = WatchlistResponse),
        (status = 400, description = "Body is not a JSON object"),
        (status = 500, description = "Database error")
    )
)]
pub async fn add_to_watchlist(
    db: web::Data<dyn Store>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /watchList");

    let response = watchlist_service::add_to_watchlist(db.get_ref(), body.into_inner()).await?;
    if response.success {
        log::info!("✅ {}", response.message);
    } else {
        log::warn!("⚠️ {}", response.message);
    }
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/watchList",
    tag = "Watchlist",
    params(EmailQuery),
    responses(
        (status = 200, description = "Watchlist of the given email", body = Vec<WatchlistItemInput>),
        (status = 500, description = "Database error")
    )
)]
pub async fn list_watchlist(
    db: web::Data<dyn Store>,
    query: web::Query<EmailQuery>,
) -> Result<HttpResponse, AppError> {
    let email = query.into_inner().email;
    log::info!("📋 GET /watchList - email={:?}", email);

    let items = watchlist_service::watchlist_by_email(db.get_ref(), email).await?;
    Ok(HttpResponse::Ok().json(items))
}

#[utoipa::path(
    delete,
    path = "/watchList/{id}",
    tag = "Watchlist",
    params(("id" = String, Path, description = "Watchlist item ObjectId (24 hex chars)")),
    responses(
        (status = 200, description = "deletedCount is 0 when nothing matched", body = DeleteAck),
        (status = 400, description = "Malformed id"),
        (status = 500, description = "Database error")
    )
)]
pub async fn delete_watchlist_item(
    db: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("🗑️  DELETE /watchList/{}", id);

    let result = watchlist_service::delete_watchlist_item(db.get_ref(), &id).await?;
    Ok(HttpResponse::Ok().json(result))
}
