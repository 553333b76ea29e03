// clayjar/src/flow/context.rs

//! Shared, lockable state threaded through the handlers of a single run.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::control::FlowControl;

/// Shared ownership plus interior mutability over the state of one flow run.
///
/// Guards are blocking and MUST be dropped before any `.await`: copy what a
/// handler needs out of the guard, release it, then do the I/O.
#[derive(Debug)]
pub struct FlowContext<T: Send + Sync + 'static>(Arc<RwLock<T>>);

impl<T: Send + Sync + 'static> FlowContext<T> {
  pub fn new(data: T) -> Self {
    FlowContext(Arc::new(RwLock::new(data)))
  }

  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.0.read()
  }

  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.0.write()
  }

  /// Takes the state back out once the run is over. Falls back to cloning
  /// when a handler kept its own handle alive.
  pub fn into_inner(self) -> T
  where
    T: Clone,
  {
    match Arc::try_unwrap(self.0) {
      Ok(lock) => lock.into_inner(),
      Err(shared) => {
        let data = shared.read().clone();
        data
      }
    }
  }
}

impl<T: Send + Sync + 'static> Clone for FlowContext<T> {
  fn clone(&self) -> Self {
    FlowContext(Arc::clone(&self.0))
  }
}

impl<T: Send + Sync + 'static + Default> Default for FlowContext<T> {
  fn default() -> Self {
    Self::new(Default::default())
  }
}

/// A step handler: an async function over the shared context.
pub type Handler<TData, Err> = Box<
  dyn Fn(FlowContext<TData>) -> Pin<Box<dyn Future<Output = Result<FlowControl, Err>> + Send>>
    + Send
    + Sync,
>;
