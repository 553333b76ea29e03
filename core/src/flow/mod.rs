// clayjar/src/flow/mod.rs

//! A small asynchronous step engine. A [`Flow`] is an ordered list of named
//! steps; each step owns `before`, `on` and `after` handler lists that run in
//! that order against a shared [`FlowContext`].

pub mod context;
pub mod control;
pub mod definition;
pub mod execution;
pub mod hooks;
pub mod step;

pub use context::{FlowContext, Handler};
pub use control::{FlowControl, FlowOutcome};
pub use definition::Flow;
pub use step::StepDef;
