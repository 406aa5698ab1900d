//! Console event classification and the typed events built from it

pub mod classify;
mod domain_event;
mod kind;

pub use classify::{classify, Classified};
pub use domain_event::{
    CommandIssuedEvent, DomainEvent, PlayerChatEvent, PlayerDisconnectEvent, PlayerLoginEvent,
};
pub use kind::{EventKind, ParseEventKindError};
