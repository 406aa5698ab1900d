//! # bridge-core
//!
//! Domain layer for the Minecraft bridge: console records, event
//! classification, domain events, player records and the collaborator
//! traits the infrastructure crates implement.
//! This crate has no dependency on HTTP, WebSocket or runtime code.

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{ConsoleRecord, PlayerRecord};
pub use error::{DomainError, DomainResult};
pub use events::{
    classify, Classified, CommandIssuedEvent, DomainEvent, EventKind, PlayerChatEvent,
    PlayerDisconnectEvent, PlayerLoginEvent,
};
pub use traits::{ChatSink, ChatTarget, RosterSource, SinkError};
