// clayjar/src/service/contexts.rs

//! Per-run state of the mutating use cases. Handlers see these through a
//! `FlowContext`.

use crate::model::{Jar, JarEvent, JarRequest};

#[derive(Debug, Clone)]
pub struct CreateJarCtx {
  /// Built from the request; id and timestamps are filled in by the store.
  pub jar: Jar,
  pub event: Option<JarEvent>,
}

#[derive(Debug, Clone)]
pub struct UpdateJarCtx {
  pub id: String,
  pub request: JarRequest,
  /// The stored record, once fetched; mutated in place afterwards.
  pub jar: Option<Jar>,
  pub event: Option<JarEvent>,
}

#[derive(Debug, Clone)]
pub struct DeleteJarCtx {
  pub id: String,
  /// Read before deletion so the event can carry its id and last update time.
  pub jar: Option<Jar>,
  pub event: Option<JarEvent>,
}

impl CreateJarCtx {
  pub fn new(request: JarRequest) -> Self {
    Self {
      jar: Jar::from_request(request),
      event: None,
    }
  }
}

impl UpdateJarCtx {
  pub fn new(id: &str, request: JarRequest) -> Self {
    Self {
      id: id.to_string(),
      request,
      jar: None,
      event: None,
    }
  }
}

impl DeleteJarCtx {
  pub fn new(id: &str) -> Self {
    Self {
      id: id.to_string(),
      jar: None,
      event: None,
    }
  }
}
