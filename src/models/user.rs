use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ack::UpdateAck;
use crate::utils::AppError;

pub const MSG_USER_STORED: &str = "User stored/updated successfully";

/// Body of `PUT /users`. Missing fields are stored as null.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpsertUserRequest {
    #[serde(default)]
    #[schema(value_type = String)]
    pub email: Value,
    #[serde(default)]
    #[schema(value_type = String)]
    pub name: Value,
    #[serde(default)]
    #[schema(value_type = String)]
    pub photo: Value,
}

impl UpsertUserRequest {
    /// Serde would also accept a positional array here; only objects are valid bodies.
    pub fn from_body(body: Value) -> Result<Self, AppError> {
        if !body.is_object() {
            return Err(AppError::InvalidRequest(format!(
                "expected a JSON object body, got {}",
                crate::utils::json::kind_of(&body)
            )));
        }
        serde_json::from_value(body).map_err(|e| AppError::InvalidRequest(e.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct UserStoredResponse {
    pub message: String,
    pub result: UpdateAck,
}

/// `?email=` filter shared by the per-user listings.
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    pub email: Option<String>,
}

/// User document as stored in the `users` collection.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub photo: Option<String>,
}
