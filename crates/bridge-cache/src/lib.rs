//! # bridge-cache
//!
//! In-memory stores owned by each server connection.
//!
//! ## Features
//!
//! - **Player Directory**: name <-> identifier lookups backed by the server roster,
//!   refreshed wholesale on a miss
//! - **Event History**: bounded rolling logs of chat, login, logout and command events
//!
//! ## Example
//!
//! ```ignore
//! use bridge_cache::{EventHistory, PlayerDirectory};
//!
//! let directory = PlayerDirectory::new(Arc::new(api_client));
//! let uuid = directory.resolve_by_name("Steve").await?;
//!
//! let history = EventHistory::new(500);
//! history.push(event);
//! let last_chat = history.recent(EventKind::PlayerChat, 10);
//! ```

pub mod directory;
pub mod history;

pub use directory::PlayerDirectory;
pub use history::{EventHistory, HistoryCounts};
