//! Console stream: sources, errors and the record connector

mod connector;
mod error;
mod source;
mod websocket;

pub use connector::{EventStreamConnector, RecordOutcome, DEFAULT_STALE_AFTER_MS};
pub use error::StreamError;
pub use source::{ConsoleSource, FrameStream};
pub use websocket::{WebSocketSource, KEY_COOKIE};
