// jar_service/src/main.rs

mod adapters;
mod config;
mod errors;
mod state;
mod web;

use crate::adapters::{KafkaJarPublisher, PgJarStore};
use crate::config::{AppConfig, LogFormat};
use crate::errors::Result as AppResult;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use clayjar::JarService;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

const SHUTDOWN_TIMEOUT_SECS: u64 = 15;

fn init_tracing(format: LogFormat) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE);
  match format {
    LogFormat::Json => builder.json().init(),
    LogFormat::Text => builder.init(),
  }
}

#[actix_web::main]
async fn main() -> AppResult<()> {
  let app_config = AppConfig::from_env()?;
  init_tracing(app_config.log_format);
  tracing::info!(
    host = %app_config.server_host,
    port = app_config.server_port,
    topic = %app_config.kafka_topic,
    "Starting jar service..."
  );

  let db_pool = PgPoolOptions::new()
    .max_connections(10)
    .acquire_timeout(app_config.deadlines.store)
    .connect(&app_config.database_url)
    .await
    .map_err(|e| {
      tracing::error!(error = %e, "Failed to connect to the database.");
      e
    })?;
  tracing::info!("Successfully connected to the database.");

  let store = Arc::new(PgJarStore::new(db_pool));
  if let Err(e) = store.ensure_indexes().await {
    tracing::warn!(error = %e, "Failed to ensure jars table and indexes; continuing.");
  }

  let publisher = Arc::new(KafkaJarPublisher::new(
    &app_config.kafka_brokers,
    &app_config.kafka_topic,
    app_config.deadlines.publish,
  )?);
  tracing::info!(brokers = ?app_config.kafka_brokers, "Kafka producer ready.");

  let jar_service = JarService::with_deadlines(store, publisher.clone(), app_config.deadlines);
  tracing::info!(deadlines = ?jar_service.deadlines(), "Jar service ready.");
  let app_state = actix_data::Data::new(AppState {
    jar_service: Arc::new(jar_service),
  });

  let server_address = (app_config.server_host.clone(), app_config.server_port);
  tracing::info!("Binding server to {}:{}...", server_address.0, server_address.1);

  HttpServer::new(move || {
    App::new()
      .app_data(app_state.clone())
      .app_data(web::json_config())
      .wrap(TracingLogger::default())
      .configure(web::configure_app_routes)
  })
  .bind(server_address)?
  .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
  .run()
  .await?;

  tracing::info!("Server stopped; flushing pending events.");
  if let Err(e) = publisher.flush(Duration::from_secs(SHUTDOWN_TIMEOUT_SECS)) {
    tracing::error!(error = %e, "Failed to flush pending events.");
  }
  Ok(())
}
