// clayjar/src/model/event.rs

//! Change notifications emitted after every successful catalog mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::jar::Jar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JarEventKind {
  #[serde(rename = "jar.created")]
  Created,
  #[serde(rename = "jar.updated")]
  Updated,
  #[serde(rename = "jar.deleted")]
  Deleted,
}

impl JarEventKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      JarEventKind::Created => "jar.created",
      JarEventKind::Updated => "jar.updated",
      JarEventKind::Deleted => "jar.deleted",
    }
  }
}

impl std::fmt::Display for JarEventKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Envelope handed to the publisher. Delivery is keyed by `jar_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JarEvent {
  #[serde(rename = "type")]
  pub kind: JarEventKind,
  pub jar_id: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub payload: Option<Jar>,
  pub timestamp: DateTime<Utc>,
}

impl JarEvent {
  pub fn created(jar: &Jar) -> Self {
    Self {
      kind: JarEventKind::Created,
      jar_id: jar.id_string(),
      payload: Some(jar.clone()),
      timestamp: jar.created_at,
    }
  }

  pub fn updated(jar: &Jar) -> Self {
    Self {
      kind: JarEventKind::Updated,
      jar_id: jar.id_string(),
      payload: Some(jar.clone()),
      timestamp: jar.updated_at,
    }
  }

  /// Built from the record as it was read just before deletion.
  pub fn deleted(jar: &Jar) -> Self {
    Self {
      kind: JarEventKind::Deleted,
      jar_id: jar.id_string(),
      payload: None,
      timestamp: jar.updated_at,
    }
  }
}
