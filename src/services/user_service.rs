use mongodb::bson::doc;
use serde_json::Value;

use crate::{
    database::{FindQuery, Store, USERS},
    models::{user::MSG_USER_STORED, UpsertUserRequest, UserStoredResponse},
    utils::{
        json::{documents_to_json, json_to_bson},
        AppError,
    },
};

/// PUT /users - Insert-or-overwrite keyed on `email`
pub async fn upsert_user(db: &dyn Store, body: Value) -> Result<UserStoredResponse, AppError> {
    let request = UpsertUserRequest::from_body(body)?;
    let email = json_to_bson(request.email);
    let name = json_to_bson(request.name);
    let photo = json_to_bson(request.photo);

    let result = db
        .update_one(
            USERS,
            doc! { "email": email.clone() },
            doc! { "email": email, "name": name, "photo": photo },
            true,
        )
        .await?;

    Ok(UserStoredResponse {
        message: MSG_USER_STORED.to_string(),
        result,
    })
}

pub async fn list_users(db: &dyn Store) -> Result<Vec<Value>, AppError> {
    let users = db.find(USERS, FindQuery::all()).await?;
    Ok(documents_to_json(users))
}
