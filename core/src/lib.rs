// clayjar/src/lib.rs

//! clayjar: the jar catalog domain and the orchestration of its use cases.
//!
//! Every mutating use case runs as a [`Flow`] of named steps:
//!  - `create`: validate → persist → publish
//!  - `update`: fetch_existing → apply_changes → validate → persist → publish
//!  - `delete`: fetch_existing → remove → publish
//!
//! Persistence and event delivery are capabilities ([`JarStore`],
//! [`JarPublisher`]) injected into [`JarService`]. The store write always
//! happens before the event is published, and a failed publish is reported
//! without undoing the write.

pub mod deadline;
pub mod error;
pub mod flow;
pub mod model;
pub mod ports;
pub mod service;

pub use crate::deadline::Deadlines;
pub use crate::error::{ErrorKind, FlowError, ServiceError, ServiceResult};
pub use crate::flow::{Flow, FlowContext, FlowControl, FlowOutcome, StepDef};
pub use crate::model::{Jar, JarAttributes, JarEvent, JarEventKind, JarRequest, ValidationError};
pub use crate::ports::{JarPublisher, JarStore, PublishFailure, StoreError};
pub use crate::service::{clamp_page, JarService};
