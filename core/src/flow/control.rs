// clayjar/src/flow/control.rs

//! Signals for controlling flow execution and the outcome of a run.

/// Returned by every handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowControl {
  /// Proceed with the next handler or step.
  Continue,
  /// Halt the flow. No further handlers of this or later steps run.
  Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
  /// Every non-skipped step ran to completion.
  Completed,
  /// A handler returned [`FlowControl::Stop`].
  Stopped,
}
