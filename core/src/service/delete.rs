// clayjar/src/service/delete.rs

//! `delete`: fetch_existing → remove → publish.

use std::sync::Arc;

use tracing::info;

use super::contexts::DeleteJarCtx;
use super::{fetched, publish_event};
use crate::deadline::{bounded_store, Deadlines};
use crate::error::ServiceError;
use crate::flow::{Flow, FlowContext, FlowControl};
use crate::model::JarEvent;
use crate::ports::{JarPublisher, JarStore};

pub const FLOW_NAME: &str = "delete_jar";

pub(crate) fn build_delete_flow(
  store: Arc<dyn JarStore>,
  publisher: Arc<dyn JarPublisher>,
  deadlines: Deadlines,
) -> Flow<DeleteJarCtx, ServiceError> {
  let mut flow = Flow::<DeleteJarCtx, ServiceError>::new(
    FLOW_NAME,
    &[("fetch_existing", false), ("remove", false), ("publish", false)],
  );

  let fetch_store = store.clone();
  flow.on_step("fetch_existing", move |ctx: FlowContext<DeleteJarCtx>| {
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

  flow.on_step("remove", move |ctx: FlowContext<DeleteJarCtx>| {
    let store = store.clone();
    async move {
      let id = ctx.read().id.clone();
      bounded_store(deadlines.store, store.delete(&id)).await?;
      info!(jar_id = %id, "Delete jar: removed.");
      Ok::<_, ServiceError>(FlowControl::Continue)
    }
  });

  flow.on_step("publish", move |ctx: FlowContext<DeleteJarCtx>| {
    let publisher = publisher.clone();
    async move {
      let event = JarEvent::deleted(fetched(&ctx.read().jar, FLOW_NAME)?);
      publish_event(publisher.as_ref(), deadlines.publish, &event).await?;
      ctx.write().event = Some(event);
      Ok::<_, ServiceError>(FlowControl::Continue)
    }
  });

  flow
}
