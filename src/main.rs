mod api;
mod config;
mod database;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::database::{MongoDB, Store};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();

    log::info!("🚀 Starting Chill Gamers service...");
    log::info!("📊 Database: {} ({})", config.redacted_uri(), config.database_name);

    let db = MongoDB::new(&config.mongodb_uri, &config.database_name)
        .await
        .map_err(|e| {
            log::error!("❌ Invalid MongoDB configuration: {}", e);
            std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
        })?;

    // A failed ping is not fatal: the server still comes up and store-backed
    // routes answer 500 until the database is reachable.
    match db.ping().await {
        Ok(()) => {
            log::info!("✅ Connected to MongoDB successfully.");
            if let Err(e) = db.ensure_indexes().await {
                log::warn!("⚠️  Index setup skipped: {}", e);
            }
        }
        Err(e) => log::error!("❌ MongoDB ping failed: {}", e),
    }

    let store: Arc<dyn Store> = Arc::new(db);
    let store_data: web::Data<dyn Store> = web::Data::from(store);

    let bind_address = config.bind_address();
    log::info!("🌐 Server is running on port {}", config.port);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind_address);

    HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store_data.clone())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
