use serde::{Deserialize, Serialize};

/// Fields rewritten by `PUT /review/{id}`. Every update sets all six; a field
/// absent from the body is stored as null.
pub const UPDATABLE_FIELDS: [&str; 6] = ["coverUrl", "title", "description", "rating", "year", "genre"];

/// Fields coerced to numbers on create and update.
pub const NUMERIC_FIELDS: [&str; 2] = ["rating", "year"];

pub const TOP_RATED_LIMIT: i64 = 6;

/// Review document as stored in the `reviews` collection.
///
/// Handlers work on raw documents; this type describes the usual shape for
/// the API docs. Callers may send extra fields and they are stored as-is.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    pub cover_url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub year: Option<f64>,
    pub genre: Option<String>,
    pub user_email: Option<String>,
}

/// Body accepted by `POST /review` and `PUT /review/{id}`.
/// `rating` and `year` may be sent as numbers or numeric strings.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    pub cover_url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = String, example = "8")]
    pub rating: Option<serde_json::Value>,
    #[schema(value_type = String, example = "2021")]
    pub year: Option<serde_json::Value>,
    pub genre: Option<String>,
    pub user_email: Option<String>,
}
