use serde::{Deserialize, Serialize};

use super::ack::InsertAck;

pub const MSG_ADDED: &str = "Added to WatchList!";
pub const MSG_ALREADY_PRESENT: &str = "Already in WatchList";

/// Keys that make a watchlist entry unique per user.
pub const KEY_FIELDS: [&str; 2] = ["userEmail", "title"];

/// Watchlist item as sent by clients. Only `userEmail` and `title` are
/// meaningful to the service; anything else is stored verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItemInput {
    pub user_email: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct WatchlistResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<InsertAck>,
}

impl WatchlistResponse {
    pub fn added(result: InsertAck) -> Self {
        Self {
            success: true,
            message: MSG_ADDED.to_string(),
            result: Some(result),
        }
    }

    pub fn already_present() -> Self {
        Self {
            success: false,
            message: MSG_ALREADY_PRESENT.to_string(),
            result: None,
        }
    }
}
