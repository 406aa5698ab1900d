//! # bridge-client
//!
//! Infrastructure adapters for the bridge:
//!
//! - [`ServerApiClient`]: typed access to the game server's management REST API
//! - [`OneBotSink`] / [`LogSink`]: [`ChatSink`](bridge_core::ChatSink) implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bridge_client::{ClientConfig, ServerApiClient};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ServerApiClient::new(ClientConfig::new("127.0.0.1:4567", "change_me"))?;
//!     client.broadcast("Server restarting in 5 minutes").await?;
//!     let output = client.execute_command("list").await?;
//!     println!("{}", output.text());
//!     Ok(())
//! }
//! ```

pub mod sink;
pub mod transport;

// Re-export commonly used types
pub use sink::{LogSink, OneBotSink};
pub use transport::{
    ClientConfig, CommandOutput, InventoryItem, Objective, OnlinePlayer, OperatorEntry,
    PluginInfo, Score, ScoreboardSummary, ServerApiClient, ServerInfo, TransportError,
    TransportResult, WhitelistEntry, World,
};
