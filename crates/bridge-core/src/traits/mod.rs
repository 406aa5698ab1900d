//! Collaborator traits (ports) implemented by the infrastructure crates

mod roster;
mod sink;

pub use roster::RosterSource;
pub use sink::{ChatSink, ChatTarget, SinkError};
