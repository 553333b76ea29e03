// clayjar/src/service/update.rs

//! `update`: fetch_existing → apply_changes → validate → persist → publish.

use std::sync::Arc;

use tracing::{info, warn};

use super::contexts::UpdateJarCtx;
use super::{fetched, publish_event};
use crate::deadline::{bounded_store, Deadlines};
use crate::error::ServiceError;
use crate::flow::{Flow, FlowContext, FlowControl};
use crate::model::JarEvent;
use crate::ports::{JarPublisher, JarStore};

pub const FLOW_NAME: &str = "update_jar";

pub(crate) fn build_update_flow(
  store: Arc<dyn JarStore>,
  publisher: Arc<dyn JarPublisher>,
  deadlines: Deadlines,
) -> Flow<UpdateJarCtx, ServiceError> {
  let mut flow = Flow::<UpdateJarCtx, ServiceError>::new(
    FLOW_NAME,
    &[
      ("fetch_existing", false),
      ("apply_changes", false),
      ("validate", false),
      ("persist", false),
      ("publish", false),
    ],
  );

  let fetch_store = store.clone();
  flow.on_step("fetch_existing", move |ctx: FlowContext<UpdateJarCtx>| {
    let store = fetch_store.clone();
    async move {
      let id = ctx.read().id.clone();
      let existing = bounded_store(deadlines.store, store.find_by_id(&id))
        .await
        .map_err(|e| ServiceError::from_lookup(&id, e))?;
      ctx.write().jar = Some(existing);
      Ok::<_, ServiceError>(FlowControl::Continue)
    }
  });

  flow.on_step("apply_changes", |ctx: FlowContext<UpdateJarCtx>| async move {
    let mut guard = ctx.write();
    let request = guard.request.clone();
    let jar = guard
      .jar
      .as_mut()
      .ok_or(crate::error::FlowError::MissingOutput { flow: FLOW_NAME })?;
    jar.apply_request(request);
    Ok::<_, ServiceError>(FlowControl::Continue)
  });

  flow.on_step("validate", |ctx: FlowContext<UpdateJarCtx>| async move {
    let verdict = fetched(&ctx.read().jar, FLOW_NAME)?.validate();
    if let Err(rule) = verdict {
      warn!(reason = %rule, "Update jar: rejected by validation.");
      return Err(ServiceError::Validation(rule));
    }
    Ok(FlowControl::Continue)
  });

  flow.on_step("persist", move |ctx: FlowContext<UpdateJarCtx>| {
    let store = store.clone();
    async move {
      let (id, mut jar) = {
        let guard = ctx.read();
        (guard.id.clone(), fetched(&guard.jar, FLOW_NAME)?.clone())
      };
      bounded_store(deadlines.store, store.update(&id, &mut jar)).await?;
      info!(jar_id = %id, "Update jar: stored.");
      ctx.write().jar = Some(jar);
      Ok::<_, ServiceError>(FlowControl::Continue)
    }
  });

  flow.on_step("publish", move |ctx: FlowContext<UpdateJarCtx>| {
    let publisher = publisher.clone();
    async move {
      let event = JarEvent::updated(fetched(&ctx.read().jar, FLOW_NAME)?);
      publish_event(publisher.as_ref(), deadlines.publish, &event).await?;
      ctx.write().event = Some(event);
      Ok::<_, ServiceError>(FlowControl::Continue)
    }
  });

  flow
}
