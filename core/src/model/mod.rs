//! Catalog entity and event types.

pub mod event;
pub mod jar;

pub use event::{JarEvent, JarEventKind};
pub use jar::{Jar, JarAttributes, JarRequest, ValidationError};
