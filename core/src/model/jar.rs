// clayjar/src/model/jar.rs

//! The `Jar` catalog entity, its creation/update request shape, validation
//! rules and lifecycle stamping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Measured in UTF-8 bytes.
pub const NAME_MAX_BYTES: usize = 200;
pub const PRICE_MIN: f64 = 0.01;
pub const PRICE_MAX: f64 = 10_000.0;
pub const STOCK_MAX: i64 = 100_000;

/// Descriptive attributes of a jar. None of these are validated; absent
/// fields fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JarAttributes {
  pub clay_type: String,
  pub dimensions: String,
  pub capacity: String,
  pub weight: String,
  pub food_safe: bool,
  pub microwave_safe: bool,
  pub dishwasher_safe: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub glaze_type: Option<String>,
  pub production_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Jar {
  /// Assigned once by [`Jar::prepare_for_create`], never afterwards.
  pub id: Option<Uuid>,
  pub name: String,
  pub description: String,
  pub category: String,
  pub price: f64,
  pub stock_qty: i64,
  pub image_url: String,
  pub attributes: JarAttributes,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Editable fields of a jar, as sent by clients on create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JarRequest {
  pub name: String,
  pub description: String,
  pub category: String,
  pub price: f64,
  pub stock_qty: i64,
  pub image_url: String,
  pub attributes: JarAttributes,
}

/// The first invariant a jar violates. Messages are part of the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("Name attribute is mandatory")]
  NameMissing,
  #[error("Name attribute must be less than 200 characters")]
  NameTooLong,
  #[error("Price must be at least 0.01")]
  PriceTooLow,
  #[error("Price must not exceed 10000")]
  PriceTooHigh,
  #[error("Stock quantity cannot be negative")]
  StockNegative,
  #[error("Stock quantity exceeds allowed maximum")]
  StockTooHigh,
}

impl Jar {
  /// Builds an unsaved jar (no id, zero timestamps) from a request.
  pub fn from_request(req: JarRequest) -> Self {
    let mut jar = Jar::default();
    jar.apply_request(req);
    jar
  }

  /// Overwrites every editable field. `id` and `created_at` are left alone.
  pub fn apply_request(&mut self, req: JarRequest) {
    self.name = req.name;
    self.description = req.description;
    self.category = req.category;
    self.price = req.price;
    self.stock_qty = req.stock_qty;
    self.image_url = req.image_url;
    self.attributes = req.attributes;
  }

  /// Checks the invariants in a fixed order and reports only the first
  /// violation.
  pub fn validate(&self) -> Result<(), ValidationError> {
    if self.name.is_empty() {
      return Err(ValidationError::NameMissing);
    }
    if self.name.len() > NAME_MAX_BYTES {
      return Err(ValidationError::NameTooLong);
    }
    // Written so that NaN lands here as well.
    if !(self.price >= PRICE_MIN) {
      return Err(ValidationError::PriceTooLow);
    }
    if self.price > PRICE_MAX {
      return Err(ValidationError::PriceTooHigh);
    }
    if self.stock_qty < 0 {
      return Err(ValidationError::StockNegative);
    }
    if self.stock_qty > STOCK_MAX {
      return Err(ValidationError::StockTooHigh);
    }
    Ok(())
  }

  /// Assigns an identifier if none is set and stamps both timestamps.
  pub fn prepare_for_create(&mut self) {
    if self.id.is_none() {
      self.id = Some(Uuid::new_v4());
    }
    let now = Utc::now();
    self.created_at = now;
    self.updated_at = now;
  }

  /// Stamps `updated_at` only.
  pub fn prepare_for_update(&mut self) {
    self.updated_at = Utc::now().max(self.created_at);
  }

  /// The identifier as carried on events and in URLs; empty before creation.
  pub fn id_string(&self) -> String {
    self.id.map(|id| id.to_string()).unwrap_or_default()
  }
}
