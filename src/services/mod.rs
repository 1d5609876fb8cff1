pub mod review_service;
pub mod user_service;
pub mod watchlist_service;

use mongodb::bson::{doc, Bson, Document};

/// `{userEmail: email}`; a missing email filters on null, which also matches
/// documents without the field.
pub fn email_filter(email: Option<String>) -> Document {
    doc! { "userEmail": email.map(Bson::String).unwrap_or(Bson::Null) }
}
