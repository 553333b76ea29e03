// clayjar/src/service/mod.rs

//! The jar use cases. Mutations run as flows (validate, persist, then
//! announce); reads are single store calls.
//!
//! A publish failure is reported to the caller even though the store write
//! before it has already committed. Nothing is rolled back, so callers that
//! see [`ServiceError::Publish`] must assume the change is stored.

pub mod contexts;
pub mod create;
pub mod delete;
pub mod update;

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, instrument};

use crate::deadline::{bounded_publish, bounded_store, Deadlines};
use crate::error::{FlowError, ServiceError, ServiceResult};
use crate::flow::{Flow, FlowContext, FlowOutcome};
use crate::model::{Jar, JarEvent, JarRequest};
use crate::ports::{JarPublisher, JarStore};

pub use contexts::{CreateJarCtx, DeleteJarCtx, UpdateJarCtx};

pub const DEFAULT_PAGE_LIMIT: i64 = 10;
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Coerces list paging into range: a non-positive limit becomes 10, anything
/// above 100 becomes 100, and a negative offset becomes 0.
pub fn clamp_page(limit: i64, offset: i64) -> (i64, i64) {
  let limit = if limit <= 0 {
    DEFAULT_PAGE_LIMIT
  } else {
    limit.min(MAX_PAGE_LIMIT)
  };
  (limit, offset.max(0))
}

pub struct JarService {
  store: Arc<dyn JarStore>,
  deadlines: Deadlines,
  create_flow: Flow<CreateJarCtx, ServiceError>,
  update_flow: Flow<UpdateJarCtx, ServiceError>,
  delete_flow: Flow<DeleteJarCtx, ServiceError>,
}

impl JarService {
  pub fn new(store: Arc<dyn JarStore>, publisher: Arc<dyn JarPublisher>) -> Self {
    Self::with_deadlines(store, publisher, Deadlines::default())
  }

  pub fn with_deadlines(store: Arc<dyn JarStore>, publisher: Arc<dyn JarPublisher>, deadlines: Deadlines) -> Self {
    Self {
      create_flow: create::build_create_flow(store.clone(), publisher.clone(), deadlines),
      update_flow: update::build_update_flow(store.clone(), publisher.clone(), deadlines),
      delete_flow: delete::build_delete_flow(store.clone(), publisher, deadlines),
      store,
      deadlines,
    }
  }

  pub fn deadlines(&self) -> Deadlines {
    self.deadlines
  }

  /// For attaching extra hooks (auditing, metrics) to the create steps.
  pub fn create_flow_mut(&mut self) -> &mut Flow<CreateJarCtx, ServiceError> {
    &mut self.create_flow
  }

  pub fn update_flow_mut(&mut self) -> &mut Flow<UpdateJarCtx, ServiceError> {
    &mut self.update_flow
  }

  pub fn delete_flow_mut(&mut self) -> &mut Flow<DeleteJarCtx, ServiceError> {
    &mut self.delete_flow
  }

  #[instrument(name = "jar_service::create", skip_all, fields(name = %req.name), err)]
  pub async fn create_jar(&self, req: JarRequest) -> ServiceResult<Jar> {
    let ctx = FlowContext::new(CreateJarCtx::new(req));
    completed(self.create_flow.run(ctx.clone()).await?, create::FLOW_NAME)?;
    let jar = ctx.into_inner().jar;
    info!(jar_id = %jar.id_string(), "Jar created.");
    Ok(jar)
  }

  #[instrument(name = "jar_service::get", skip(self), err)]
  pub async fn get_jar(&self, id: &str) -> ServiceResult<Jar> {
    bounded_store(self.deadlines.store, self.store.find_by_id(id))
      .await
      .map_err(|e| ServiceError::from_lookup(id, e))
  }

  #[instrument(name = "jar_service::list", skip(self), err)]
  pub async fn list_jars(&self, limit: i64, offset: i64) -> ServiceResult<Vec<Jar>> {
    let (limit, offset) = clamp_page(limit, offset);
    let jars = bounded_store(self.deadlines.store_scan, self.store.find_all(limit, offset)).await?;
    Ok(jars)
  }

  #[instrument(name = "jar_service::update", skip(self, req), err)]
  pub async fn update_jar(&self, id: &str, req: JarRequest) -> ServiceResult<Jar> {
    let ctx = FlowContext::new(UpdateJarCtx::new(id, req));
    completed(self.update_flow.run(ctx.clone()).await?, update::FLOW_NAME)?;
    let jar = ctx.into_inner().jar.ok_or(FlowError::MissingOutput {
      flow: update::FLOW_NAME,
    })?;
    info!(jar_id = %id, "Jar updated.");
    Ok(jar)
  }

  #[instrument(name = "jar_service::delete", skip(self), err)]
  pub async fn delete_jar(&self, id: &str) -> ServiceResult<()> {
    let ctx = FlowContext::new(DeleteJarCtx::new(id));
    completed(self.delete_flow.run(ctx).await?, delete::FLOW_NAME)?;
    info!(jar_id = %id, "Jar deleted.");
    Ok(())
  }
}

fn completed(outcome: FlowOutcome, flow: &'static str) -> Result<(), FlowError> {
  match outcome {
    FlowOutcome::Completed => Ok(()),
    FlowOutcome::Stopped => Err(FlowError::Halted { flow }),
  }
}

/// The record a previous step should have placed in the context.
pub(crate) fn fetched<'a>(jar: &'a Option<Jar>, flow: &'static str) -> Result<&'a Jar, FlowError> {
  jar.as_ref().ok_or(FlowError::MissingOutput { flow })
}

pub(crate) async fn publish_event(publisher: &dyn JarPublisher, limit: Duration, event: &JarEvent) -> ServiceResult<()> {
  match bounded_publish(limit, publisher.publish(event)).await {
    Ok(()) => Ok(()),
    Err(source) => {
      error!(
        event_type = %event.kind,
        jar_id = %event.jar_id,
        error = %source,
        "Change is stored but its event could not be published."
      );
      Err(ServiceError::Publish {
        event_type: event.kind.as_str(),
        jar_id: event.jar_id.clone(),
        source,
      })
    }
  }
}
