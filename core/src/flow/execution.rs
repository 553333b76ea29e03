// clayjar/src/flow/execution.rs

//! `Flow::run()`: executes the steps and their handlers in order.

use tracing::{event, info_span, Instrument, Level};

use super::context::{FlowContext, Handler};
use super::control::{FlowControl, FlowOutcome};
use super::definition::Flow;
use crate::error::FlowError;

impl<TData, Err> Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Runs every step against `ctx`.
  ///
  /// The first handler error is returned as is and nothing after it runs.
  /// A required step with no handlers fails with
  /// [`FlowError::HandlerMissing`], converted into `Err`.
  pub async fn run(&self, ctx: FlowContext<TData>) -> Result<FlowOutcome, Err> {
    let flow_span = info_span!("flow", flow = self.name, num_steps = self.steps.len());
    self.run_steps(ctx).instrument(flow_span).await
  }

  async fn run_steps(&self, ctx: FlowContext<TData>) -> Result<FlowOutcome, Err> {
    event!(Level::DEBUG, "Flow execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();
      let phases = [
        ("before", self.before.get(step_name)),
        ("on", self.on.get(step_name)),
        ("after", self.after.get(step_name)),
      ];

      if phases.iter().all(|(_, handlers)| handlers.map_or(true, |v| v.is_empty())) {
        if step_def.optional {
          event!(Level::DEBUG, step = step_name, "Optional step has no handlers, skipping.");
          continue;
        }
        event!(Level::ERROR, step = step_name, "Required step has no handlers.");
        return Err(Err::from(FlowError::HandlerMissing {
          step_name: step_def.name.clone(),
        }));
      }

      let step_span = info_span!("flow_step", step = step_name, step_index = step_idx);
      for (phase, handlers) in phases {
        let Some(handlers) = handlers else { continue };
        let control = Self::run_phase(phase, handlers, &ctx).instrument(step_span.clone()).await?;
        if control == FlowControl::Stop {
          event!(Level::INFO, flow = self.name, step = step_name, phase, "Flow stopped by a handler.");
          return Ok(FlowOutcome::Stopped);
        }
      }
    }

    event!(Level::DEBUG, "Flow execution completed.");
    Ok(FlowOutcome::Completed)
  }

  async fn run_phase(
    phase: &'static str,
    handlers: &[Handler<TData, Err>],
    ctx: &FlowContext<TData>,
  ) -> Result<FlowControl, Err> {
    for handler_fn in handlers {
      match handler_fn(ctx.clone()).await {
        Ok(FlowControl::Continue) => {}
        Ok(FlowControl::Stop) => return Ok(FlowControl::Stop),
        Err(e) => {
          event!(Level::WARN, phase, error = %e, "Step handler failed.");
          return Err(e);
        }
      }
    }
    Ok(FlowControl::Continue)
  }
}
