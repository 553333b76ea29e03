// clayjar/src/error.rs
use thiserror::Error;

use crate::model::ValidationError;
use crate::ports::{PublishFailure, StoreError};

/// Failures raised by the flow engine itself rather than by a step handler.
#[derive(Debug, Error)]
pub enum FlowError {
  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Flow '{flow}' completed without producing its result")]
  MissingOutput { flow: &'static str },

  #[error("Flow '{flow}' was halted by a step handler")]
  Halted { flow: &'static str },
}

/// Coarse classification of a [`ServiceError`], used by the request/response
/// boundary to pick a transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  Validation,
  NotFound,
  Persistence,
  Publish,
  Internal,
}

/// The classified failure of a jar use case.
#[derive(Debug, Error)]
pub enum ServiceError {
  #[error("validation failed: {0}")]
  Validation(#[from] ValidationError),

  #[error("jar not found: {id}")]
  NotFound { id: String },

  #[error("persistence failed: {0}")]
  Persistence(#[source] StoreError),

  /// The store mutation already committed when this is returned.
  #[error("failed to publish {event_type} event for jar {jar_id}: {source}")]
  Publish {
    event_type: &'static str,
    jar_id: String,
    #[source]
    source: PublishFailure,
  },

  #[error("flow error: {0}")]
  Flow(#[from] FlowError),
}

impl ServiceError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      ServiceError::Validation(_) => ErrorKind::Validation,
      ServiceError::NotFound { .. } => ErrorKind::NotFound,
      ServiceError::Persistence(_) => ErrorKind::Persistence,
      ServiceError::Publish { .. } => ErrorKind::Publish,
      ServiceError::Flow(_) => ErrorKind::Internal,
    }
  }

  /// Maps a store failure from a lookup by id. A missing record and a
  /// malformed identifier are the same thing to callers.
  pub(crate) fn from_lookup(id: &str, err: StoreError) -> Self {
    match err {
      StoreError::NotFound | StoreError::MalformedId(_) => ServiceError::NotFound { id: id.to_string() },
      other => ServiceError::Persistence(other),
    }
  }
}

impl From<StoreError> for ServiceError {
  fn from(err: StoreError) -> Self {
    ServiceError::Persistence(err)
  }
}

pub type ServiceResult<T, E = ServiceError> = std::result::Result<T, E>;
