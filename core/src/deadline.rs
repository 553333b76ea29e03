// clayjar/src/deadline.rs

//! Upper bounds on every store and publisher call made by the use cases.

use std::future::Future;
use std::time::Duration;

use crate::ports::{PublishFailure, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadlines {
  /// find_by_id, create, update, delete.
  pub store: Duration,
  /// find_all.
  pub store_scan: Duration,
  pub publish: Duration,
}

impl Default for Deadlines {
  fn default() -> Self {
    Self {
      store: Duration::from_secs(5),
      store_scan: Duration::from_secs(10),
      publish: Duration::from_secs(5),
    }
  }
}

pub(crate) async fn bounded_store<T, F>(limit: Duration, fut: F) -> Result<T, StoreError>
where
  F: Future<Output = Result<T, StoreError>>,
{
  tokio::time::timeout(limit, fut)
    .await
    .unwrap_or(Err(StoreError::Timeout(limit)))
}

pub(crate) async fn bounded_publish<F>(limit: Duration, fut: F) -> Result<(), PublishFailure>
where
  F: Future<Output = Result<(), PublishFailure>>,
{
  tokio::time::timeout(limit, fut)
    .await
    .unwrap_or(Err(PublishFailure::Timeout(limit)))
}
