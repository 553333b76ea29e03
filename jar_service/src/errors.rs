// jar_service/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use clayjar::{ErrorKind, ServiceError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error(transparent)]
  Service(#[from] ServiceError),

  #[error("Invalid request payload: {0}")]
  InvalidPayload(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Kafka Error: {0}")]
  Kafka(#[from] rdkafka::error::KafkaError),

  #[error("I/O Error: {0}")]
  Io(#[from] std::io::Error),
}

impl AppError {
  /// The message placed in the `error` field of the response body.
  fn client_message(&self) -> String {
    match self {
      AppError::Service(err) => match err {
        ServiceError::Validation(rule) => rule.to_string(),
        ServiceError::NotFound { .. } => "Jar not found".to_string(),
        ServiceError::Publish { event_type, .. } => {
          format!("Jar change was stored but the {} notification failed", event_type)
        }
        other => other.to_string(),
      },
      AppError::InvalidPayload(_) => "Invalid request payload".to_string(),
      other => other.to_string(),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Service(err) => match err.kind() {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Persistence | ErrorKind::Publish | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
      },
      AppError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Kafka(_) | AppError::Io(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, "Rejecting request");
    }
    HttpResponse::build(status).json(json!({ "error": self.client_message() }))
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
