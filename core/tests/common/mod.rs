// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper.

use async_trait::async_trait;
use clayjar::{Jar, JarAttributes, JarEvent, JarPublisher, JarRequest, JarStore, PublishFailure, StoreError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;
use tracing::Level;
use uuid::Uuid;

// --- Store double ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
  Create,
  FindById(String),
  FindAll { limit: i64, offset: i64 },
  Update(String),
  Delete(String),
}

/// In-memory store that records every call and can be told to fail or stall.
#[derive(Default)]
pub struct RecordingStore {
  rows: Mutex<HashMap<Uuid, Jar>>,
  calls: Mutex<Vec<StoreCall>>,
  failing: Mutex<bool>,
  failing_writes: Mutex<bool>,
  delay: Mutex<Option<Duration>>,
}

impl RecordingStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn calls(&self) -> Vec<StoreCall> {
    self.calls.lock().clone()
  }

  /// Calls that would have changed stored data.
  pub fn mutations(&self) -> Vec<StoreCall> {
    self
      .calls()
      .into_iter()
      .filter(|c| matches!(c, StoreCall::Create | StoreCall::Update(_) | StoreCall::Delete(_)))
      .collect()
  }

  pub fn len(&self) -> usize {
    self.rows.lock().len()
  }

  pub fn fail_with_backend_error(&self) {
    *self.failing.lock() = true;
  }

  /// Reads keep working; create, update and delete fail.
  pub fn fail_writes_with_backend_error(&self) {
    *self.failing_writes.lock() = true;
  }

  pub fn stall_for(&self, delay: Duration) {
    *self.delay.lock() = Some(delay);
  }

  /// Seeds a record directly, bypassing the call log.
  pub fn insert(&self, mut jar: Jar) -> Jar {
    jar.prepare_for_create();
    self.rows.lock().insert(jar.id.unwrap(), jar.clone());
    jar
  }

  async fn enter(&self, call: StoreCall) -> Result<(), StoreError> {
    let is_write = matches!(call, StoreCall::Create | StoreCall::Update(_) | StoreCall::Delete(_));
    self.calls.lock().push(call);
    let delay = *self.delay.lock();
    if let Some(delay) = delay {
      tokio::time::sleep(delay).await;
    }
    if *self.failing.lock() || (is_write && *self.failing_writes.lock()) {
      return Err(StoreError::Backend(anyhow::anyhow!("store is down")));
    }
    Ok(())
  }

  fn parse(id: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(id).map_err(|_| StoreError::MalformedId(id.to_string()))
  }
}

#[async_trait]
impl JarStore for RecordingStore {
  async fn create(&self, jar: &mut Jar) -> Result<(), StoreError> {
    self.enter(StoreCall::Create).await?;
    jar.prepare_for_create();
    self.rows.lock().insert(jar.id.unwrap(), jar.clone());
    Ok(())
  }

  async fn find_by_id(&self, id: &str) -> Result<Jar, StoreError> {
    self.enter(StoreCall::FindById(id.to_string())).await?;
    let key = Self::parse(id)?;
    self.rows.lock().get(&key).cloned().ok_or(StoreError::NotFound)
  }

  async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<Jar>, StoreError> {
    self.enter(StoreCall::FindAll { limit, offset }).await?;
    let mut jars: Vec<Jar> = self.rows.lock().values().cloned().collect();
    jars.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(jars.into_iter().skip(offset as usize).take(limit as usize).collect())
  }

  async fn update(&self, id: &str, jar: &mut Jar) -> Result<(), StoreError> {
    self.enter(StoreCall::Update(id.to_string())).await?;
    let key = Self::parse(id)?;
    jar.prepare_for_update();
    self.rows.lock().insert(key, jar.clone());
    Ok(())
  }

  async fn delete(&self, id: &str) -> Result<(), StoreError> {
    self.enter(StoreCall::Delete(id.to_string())).await?;
    let key = Self::parse(id)?;
    self.rows.lock().remove(&key);
    Ok(())
  }
}

// --- Publisher double ---

#[derive(Default)]
pub struct RecordingPublisher {
  events: Mutex<Vec<JarEvent>>,
  failing: Mutex<bool>,
  delay: Mutex<Option<Duration>>,
}

impl RecordingPublisher {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn events(&self) -> Vec<JarEvent> {
    self.events.lock().clone()
  }

  pub fn fail_deliveries(&self) {
    *self.failing.lock() = true;
  }

  pub fn stall_for(&self, delay: Duration) {
    *self.delay.lock() = Some(delay);
  }
}

#[async_trait]
impl JarPublisher for RecordingPublisher {
  async fn publish(&self, event: &JarEvent) -> Result<(), PublishFailure> {
    let delay = *self.delay.lock();
    if let Some(delay) = delay {
      tokio::time::sleep(delay).await;
    }
    if *self.failing.lock() {
      return Err(PublishFailure::Delivery(anyhow::anyhow!("broker unreachable")));
    }
    self.events.lock().push(event.clone());
    Ok(())
  }
}

// --- Requests ---

pub fn amber_crock() -> JarRequest {
  JarRequest {
    name: "Amber Crock".to_string(),
    price: 24.99,
    stock_qty: 5,
    attributes: JarAttributes {
      clay_type: "stoneware".to_string(),
      food_safe: true,
      microwave_safe: true,
      dishwasher_safe: false,
      production_type: "wheel-thrown".to_string(),
      ..Default::default()
    },
    ..Default::default()
  }
}

pub fn request_with(f: impl FnOnce(&mut JarRequest)) -> JarRequest {
  let mut req = amber_crock();
  f(&mut req);
  req
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
