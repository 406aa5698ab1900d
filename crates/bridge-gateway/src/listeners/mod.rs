//! Listener registry and dispatch

mod error;
mod registry;

pub use error::{HandlerError, HandlerResult};
pub use registry::{EventListener, ListenerRegistry};
