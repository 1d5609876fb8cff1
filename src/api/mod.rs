pub mod health;
pub mod reviews;
pub mod swagger;
pub mod users;
pub mod watchlist;

use actix_web::web;

use crate::utils::AppError;

/// Same limit as the usual Node body parser default.
pub const JSON_BODY_LIMIT: usize = 100 * 1024;

/// Route table. Expects a `web::Data<dyn Store>` registered on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Extractor failures use the same JSON error body as the handlers.
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_BODY_LIMIT)
            .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into()),
    )
    // Health check
    .route("/", web::get().to(health::health_check))
    // Reviews
    .route("/review", web::post().to(reviews::create_review))
    .route("/reviews", web::get().to(reviews::list_reviews))
    .route("/my-review", web::get().to(reviews::my_reviews))
    .route("/review/{id}", web::get().to(reviews::get_review))
    .route("/review/{id}", web::delete().to(reviews::delete_review))
    .route("/review/{id}", web::put().to(reviews::update_review))
    .route("/top-rated", web::get().to(reviews::top_rated))
    // Watchlist
    .route("/watchList", web::post().to(watchlist::add_to_watchlist))
    .route("/watchList", web::get().to(watchlist::list_watchlist))
    .route("/watchList/{id}", web::delete().to(watchlist::delete_watchlist_item))
    // Users
    .route("/users", web::put().to(users::upsert_user))
    .route("/users", web::get().to(users::list_users));
}
