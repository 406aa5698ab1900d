//! Management API transport

mod client;
mod error;
mod models;

pub use client::{ClientConfig, ServerApiClient, AUTH_HEADER};
pub use error::{TransportError, TransportResult};
pub use models::{
    CommandOutput, InventoryItem, Objective, OnlinePlayer, OperatorEntry, PluginInfo, Score,
    ScoreboardSummary, ServerInfo, WhitelistEntry, World,
};
