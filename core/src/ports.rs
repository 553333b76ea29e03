// clayjar/src/ports.rs

//! Capabilities the orchestration layer consumes. Concrete adapters (a
//! database, a message broker, test doubles) are injected at construction.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Jar, JarEvent};

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("no jar stored under that id")]
  NotFound,

  #[error("malformed jar id '{0}'")]
  MalformedId(String),

  #[error("store call timed out after {0:?}")]
  Timeout(Duration),

  #[error("store backend error: {0}")]
  Backend(#[source] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum PublishFailure {
  #[error("failed to encode jar event: {0}")]
  Encode(#[from] serde_json::Error),

  #[error("publish timed out after {0:?}")]
  Timeout(Duration),

  #[error("failed to deliver jar event: {0}")]
  Delivery(#[source] anyhow::Error),
}

/// Persistence of jars. Identifiers are opaque strings here; adapters reject
/// ones they cannot parse with [`StoreError::MalformedId`].
#[async_trait]
pub trait JarStore: Send + Sync {
  /// Runs [`Jar::prepare_for_create`] on `jar` and writes it. This is the one
  /// place identifiers and creation timestamps are assigned.
  async fn create(&self, jar: &mut Jar) -> Result<(), StoreError>;

  async fn find_by_id(&self, id: &str) -> Result<Jar, StoreError>;

  /// Newest first (by `created_at`).
  async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<Jar>, StoreError>;

  /// Runs [`Jar::prepare_for_update`] on `jar` and writes its editable fields
  /// and `updated_at`.
  async fn update(&self, id: &str, jar: &mut Jar) -> Result<(), StoreError>;

  async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// Delivery of change notifications, keyed by `event.jar_id`.
#[async_trait]
pub trait JarPublisher: Send + Sync {
  async fn publish(&self, event: &JarEvent) -> Result<(), PublishFailure>;
}
