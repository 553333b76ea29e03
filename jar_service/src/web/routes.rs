// jar_service/src/web/routes.rs

use actix_web::{web, HttpRequest};

use crate::errors::AppError;
use crate::web::handlers::{health_handlers, jar_handlers};

/// JSON extractor settings: undecodable bodies become a 400 with the
/// standard error body instead of actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| AppError::InvalidPayload(err.to_string()).into())
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/health", web::get().to(health_handlers::health_check_handler))
    .service(
      web::scope("/jars")
        .route("", web::post().to(jar_handlers::create_jar_handler))
        .route("", web::get().to(jar_handlers::list_jars_handler))
        .route("/{jar_id}", web::get().to(jar_handlers::get_jar_handler))
        .route("/{jar_id}", web::put().to(jar_handlers::update_jar_handler))
        .route("/{jar_id}", web::delete().to(jar_handlers::delete_jar_handler)),
    );
}
