use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chill Gamers API",
        version = "1.0.0",
        description = "Game reviews, per-user watchlists and user profiles backed by MongoDB.\n\n**Authentication:** none. Every route is public."
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Reviews
        crate::api::reviews::create_review,
        crate::api::reviews::list_reviews,
        crate::api::reviews::my_reviews,
        crate::api::reviews::get_review,
        crate::api::reviews::delete_review,
        crate::api::reviews::update_review,
        crate::api::reviews::top_rated,

        // Watchlist
        crate::api::watchlist::add_to_watchlist,
        crate::api::watchlist::list_watchlist,
        crate::api::watchlist::delete_watchlist_item,

        // Users
        crate::api::users::upsert_user,
        crate::api::users::list_users,
    ),
    components(
        schemas(
            crate::models::Review,
            crate::models::ReviewInput,
            crate::models::WatchlistItemInput,
            crate::models::WatchlistResponse,
            crate::models::User,
            crate::models::UpsertUserRequest,
            crate::models::UserStoredResponse,
            crate::models::InsertAck,
            crate::models::UpdateAck,
            crate::models::DeleteAck,
        )
    ),
    tags(
        (name = "Health", description = "Liveness greeting."),
        (name = "Reviews", description = "Game reviews. rating and year are coerced to numbers on every write."),
        (name = "Watchlist", description = "Per-user watchlist, one entry per (userEmail, title)."),
        (name = "Users", description = "User profiles keyed by email."),
    )
)]
pub struct ApiDoc;
