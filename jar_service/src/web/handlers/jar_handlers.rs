// jar_service/src/web/handlers/jar_handlers.rs

use actix_web::{web, HttpResponse};
use clayjar::service::DEFAULT_PAGE_LIMIT;
use clayjar::JarRequest;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;

/// Paging parameters are taken as raw strings so that unparsable values
/// fall back to the defaults instead of rejecting the request.
#[derive(Deserialize, Debug, Default)]
pub struct ListJarsQuery {
  pub limit: Option<String>,
  pub offset: Option<String>,
}

impl ListJarsQuery {
  fn page(&self) -> (i64, i64) {
    let parse = |raw: &Option<String>| raw.as_deref().and_then(|v| v.trim().parse::<i64>().ok());
    (parse(&self.limit).unwrap_or(DEFAULT_PAGE_LIMIT), parse(&self.offset).unwrap_or(0))
  }
}

#[instrument(name = "handler::create_jar", skip(app_state, req_payload))]
pub async fn create_jar_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<JarRequest>,
) -> Result<HttpResponse, AppError> {
  let jar = app_state.jar_service.create_jar(req_payload.into_inner()).await?;
  info!(jar_id = %jar.id_string(), "Jar created.");
  Ok(HttpResponse::Created().json(jar))
}

#[instrument(name = "handler::list_jars", skip(app_state))]
pub async fn list_jars_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<ListJarsQuery>,
) -> Result<HttpResponse, AppError> {
  let (limit, offset) = query_params.page();
  let jars = app_state.jar_service.list_jars(limit, offset).await?;
  Ok(HttpResponse::Ok().json(jars))
}

#[instrument(name = "handler::get_jar", skip(app_state, path), fields(jar_id = %path.as_ref()))]
pub async fn get_jar_handler(app_state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
  let jar = app_state.jar_service.get_jar(&path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(jar))
}

#[instrument(name = "handler::update_jar", skip(app_state, path, req_payload), fields(jar_id = %path.as_ref()))]
pub async fn update_jar_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  req_payload: web::Json<JarRequest>,
) -> Result<HttpResponse, AppError> {
  let jar = app_state
    .jar_service
    .update_jar(&path.into_inner(), req_payload.into_inner())
    .await?;
  info!("Jar updated.");
  Ok(HttpResponse::Ok().json(jar))
}

#[instrument(name = "handler::delete_jar", skip(app_state, path), fields(jar_id = %path.as_ref()))]
pub async fn delete_jar_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  app_state.jar_service.delete_jar(&path.into_inner()).await?;
  info!("Jar deleted.");
  Ok(HttpResponse::Ok().json(json!({ "message": "Jar deleted successfully" })))
}
