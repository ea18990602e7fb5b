//! Core handler infrastructure: the handler trait, its context and the
//! command registry.

pub mod context;
pub mod registry;

pub use context::{Context, Handler};
pub use registry::{FALLBACK_LABEL, Registry, Route};
