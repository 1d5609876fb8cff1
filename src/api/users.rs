use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::{
    database::Store,
    models::{UpsertUserRequest, User, UserStoredResponse},
    services::user_service,
    utils::AppError,
};

#[utoipa::path(
    put,
    path = "/users",
    tag = "Users",
    request_body = UpsertUserRequest,
    responses(
        (status = 200, description = "User inserted or overwritten by email", body = UserStoredResponse),
        (status = 400, description = "Body is not a JSON object"),
        (status = 500, description = "Database error")
    )
)]
pub async fn upsert_user(
    db: web::Data<dyn Store>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    log::info!("👤 PUT /users - email={}", body.get("email").unwrap_or(&Value::Null));

    let response = user_service::upsert_user(db.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "Every stored user", body = Vec<User>),
        (status = 500, description = "Database error")
    )
)]
pub async fn list_users(db: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let users = user_service::list_users(db.get_ref()).await?;
    log::info!("📋 GET /users - {} users", users.len());
    Ok(HttpResponse::Ok().json(users))
}
