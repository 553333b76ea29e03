// clayjar/src/service/create.rs

//! `create`: validate → persist → publish.

use std::sync::Arc;

use tracing::{info, warn};

use super::contexts::CreateJarCtx;
use super::publish_event;
use crate::deadline::{bounded_store, Deadlines};
use crate::error::ServiceError;
use crate::flow::{Flow, FlowContext, FlowControl};
use crate::model::JarEvent;
use crate::ports::{JarPublisher, JarStore};

pub const FLOW_NAME: &str = "create_jar";

pub(crate) fn build_create_flow(
  store: Arc<dyn JarStore>,
  publisher: Arc<dyn JarPublisher>,
  deadlines: Deadlines,
) -> Flow<CreateJarCtx, ServiceError> {
  let mut flow = Flow::<CreateJarCtx, ServiceError>::new(
    FLOW_NAME,
    &[("validate", false), ("persist", false), ("publish", false)],
  );

  flow.on_step("validate", |ctx: FlowContext<CreateJarCtx>| async move {
    let verdict = ctx.read().jar.validate();
    if let Err(rule) = verdict {
      warn!(reason = %rule, "Create jar: rejected by validation.");
      return Err(ServiceError::Validation(rule));
    }
    Ok(FlowControl::Continue)
  });

  flow.on_step("persist", move |ctx: FlowContext<CreateJarCtx>| {
    let store = store.clone();
    async move {
      let mut jar = ctx.read().jar.clone();
      bounded_store(deadlines.store, store.create(&mut jar)).await?;
      info!(jar_id = %jar.id_string(), "Create jar: stored.");
      ctx.write().jar = jar;
      Ok::<_, ServiceError>(FlowControl::Continue)
    }
  });

  flow.on_step("publish", move |ctx: FlowContext<CreateJarCtx>| {
    let publisher = publisher.clone();
    async move {
      let event = JarEvent::created(&ctx.read().jar);
      publish_event(publisher.as_ref(), deadlines.publish, &event).await?;
      ctx.write().event = Some(event);
      Ok::<_, ServiceError>(FlowControl::Continue)
    }
  });

  flow
}
