use actix_web::{HttpResponse, Responder};

pub const GREETING: &str = "Hello World! Server is running.";

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Static greeting, no database access", body = String, content_type = "text/plain")
    )
)]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(GREETING)
}
