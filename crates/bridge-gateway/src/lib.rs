//! # bridge-gateway
//!
//! Console stream gateway: one managed connection per game server, an
//! explicit listener registry, the stream connector that turns console
//! frames into dispatched events, and the supervisor that keeps each
//! stream alive.

pub mod connection;
pub mod listeners;
pub mod runtime;
pub mod stream;
pub mod supervisor;

pub use connection::{ConnectionState, ServerConnection, DISCONNECTED_SERVER_NAME};
pub use listeners::{EventListener, HandlerError, HandlerResult, ListenerRegistry};
pub use runtime::{BridgeRuntime, RuntimeError};
pub use stream::{
    ConsoleSource, EventStreamConnector, FrameStream, RecordOutcome, StreamError, WebSocketSource,
};
pub use supervisor::{ConnectionSupervisor, SupervisorConfig, SupervisorHandle};
