//! Multi-server runtime

mod bridge_runtime;
mod error;

pub use bridge_runtime::BridgeRuntime;
pub use error::RuntimeError;
