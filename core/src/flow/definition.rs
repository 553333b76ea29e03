// clayjar/src/flow/definition.rs

//! The `Flow<TData, Err>` struct and its structural modification methods.

use std::collections::HashMap;

use super::context::Handler;
use super::step::StepDef;
use crate::error::FlowError;

/// An ordered set of named steps over a root data type `TData`, whose handlers
/// fail with `Err`.
///
/// `Err` must be `From<FlowError>` so that engine-level failures (a required
/// step without handlers) come back to the caller in the same error type as
/// handler failures.
pub struct Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub(crate) name: &'static str,
  pub(crate) steps: Vec<StepDef>,

  pub(crate) before: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) after: HashMap<String, Vec<Handler<TData, Err>>>,
}

impl<TData, Err> Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Creates a flow from `(step_name, optional)` pairs.
  pub fn new(name: &'static str, step_defs: &[(&str, bool)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(step_name, optional)| StepDef {
        name: (*step_name).to_string(),
        optional: *optional,
      })
      .collect();

    Self {
      name,
      steps,
      before: HashMap::new(),
      on: HashMap::new(),
      after: HashMap::new(),
    }
  }

  pub fn name(&self) -> &'static str {
    self.name
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  fn position(&self, step_name: &str) -> Option<usize> {
    self.steps.iter().position(|s| s.name == step_name)
  }

  /// Panics if the step is unknown. A typo in a step name is a setup bug, not
  /// something to report per request.
  pub(crate) fn ensure_step_exists(&self, step_name: &str) -> usize {
    match self.position(step_name) {
      Some(idx) => idx,
      None => panic!("flow '{}' has no step named '{}'", self.name, step_name),
    }
  }

  fn ensure_step_not_exists(&self, step_name: &str) {
    if self.position(step_name).is_some() {
      panic!("flow '{}' already has a step named '{}'", self.name, step_name);
    }
  }

  pub fn insert_before_step<S: Into<String>>(&mut self, existing_step_name: &str, new_step_name: S, optional: bool) {
    let idx = self.ensure_step_exists(existing_step_name);
    let name: String = new_step_name.into();
    self.ensure_step_not_exists(&name);
    self.steps.insert(idx, StepDef { name, optional });
  }

  pub fn insert_after_step<S: Into<String>>(&mut self, existing_step_name: &str, new_step_name: S, optional: bool) {
    let idx = self.ensure_step_exists(existing_step_name);
    let name: String = new_step_name.into();
    self.ensure_step_not_exists(&name);
    self.steps.insert(idx + 1, StepDef { name, optional });
  }

  /// Removes a step and its handlers. Unknown names are ignored.
  pub fn remove_step(&mut self, step_name: &str) {
    if let Some(idx) = self.position(step_name) {
      self.steps.remove(idx);
      self.before.remove(step_name);
      self.on.remove(step_name);
      self.after.remove(step_name);
    }
  }

  pub fn set_optional(&mut self, step_name: &str, optional: bool) {
    let idx = self.ensure_step_exists(step_name);
    self.steps[idx].optional = optional;
  }
}
