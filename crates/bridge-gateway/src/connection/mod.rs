//! Managed server connections

mod server_connection;
mod state;

pub use server_connection::{ServerConnection, DISCONNECTED_SERVER_NAME};
pub use state::ConnectionState;
