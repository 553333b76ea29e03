// clayjar/src/flow/hooks.rs

//! Registration of `before`, `on` and `after` handlers for flow steps.

use std::future::Future;

use super::context::{FlowContext, Handler};
use super::control::FlowControl;
use super::definition::Flow;
use crate::error::FlowError;

impl<TData, Err> Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  fn wrap<F, UserErr>(
    handler_fn: impl Fn(FlowContext<TData>) -> F + Send + Sync + 'static,
  ) -> Handler<TData, Err>
  where
    F: Future<Output = Result<FlowControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    Box::new(move |ctx| {
      let user_fut = handler_fn(ctx);
      Box::pin(async move { user_fut.await.map_err(Into::into) })
    })
  }

  /// Registers a handler that runs before the step's `on` handlers.
  ///
  /// The handler's error type only has to convert into the flow's `Err`.
  pub fn before_step<F, UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(FlowContext<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<FlowControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    let handler = Self::wrap(handler_fn);
    self.before.entry(step_name.to_string()).or_default().push(handler);
  }

  /// Registers the main work of a step.
  pub fn on_step<F, UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(FlowContext<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<FlowControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    let handler = Self::wrap(handler_fn);
    self.on.entry(step_name.to_string()).or_default().push(handler);
  }

  pub fn after_step<F, UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(FlowContext<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<FlowControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    let handler = Self::wrap(handler_fn);
    self.after.entry(step_name.to_string()).or_default().push(handler);
  }
}
