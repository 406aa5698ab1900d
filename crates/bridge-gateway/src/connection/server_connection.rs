//! One managed game server
//!
//! Holds the transport client, cached server metadata, connectivity state,
//! rolling event history and the player directory. Connectivity is written
//! only by the supervisor task; everyone else reads snapshots or awaits
//! transitions through [`ServerConnection::subscribe_state`].

use std::sync::Arc;

use bridge_cache::{EventHistory, PlayerDirectory};
use bridge_client::{ServerApiClient, ServerInfo, TransportResult};
use parking_lot::RwLock;
use tokio::sync::watch;

use super::ConnectionState;

/// Display name used while the server cannot be reached
pub const DISCONNECTED_SERVER_NAME: &str = "Server disconnected";

pub struct ServerConnection {
    endpoint: String,
    client: Arc<ServerApiClient>,
    info: RwLock<Option<ServerInfo>>,
    state_tx: watch::Sender<ConnectionState>,
    history: EventHistory,
    directory: PlayerDirectory,
}

impl ServerConnection {
    /// Create a connection whose directory is backed by the client's roster endpoint
    pub fn new(client: ServerApiClient, history_capacity: usize) -> Arc<Self> {
        let client = Arc::new(client);
        let directory = PlayerDirectory::new(client.clone());
        Self::with_directory(client, directory, history_capacity)
    }

    /// Create a connection with an explicit player directory
    pub fn with_directory(
        client: Arc<ServerApiClient>,
        directory: PlayerDirectory,
        history_capacity: usize,
    ) -> Arc<Self> {
        let (state_tx, _) = watch::channel(ConnectionState::Disconnected);
        Arc::new(Self {
            endpoint: client.endpoint().to_string(),
            client,
            info: RwLock::new(None),
            state_tx,
            history: EventHistory::new(history_capacity),
            directory,
        })
    }

    /// The configured `host:port`
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn client(&self) -> &ServerApiClient {
        &self.client
    }

    pub fn history(&self) -> &EventHistory {
        &self.history
    }

    pub fn directory(&self) -> &PlayerDirectory {
        &self.directory
    }

    // =========================================================================
    // Connectivity
    // =========================================================================

    /// Current connectivity snapshot
    pub fn state(&self) -> ConnectionState {
        *self.state_tx.borrow()
    }

    pub fn is_connected(&self) -> bool {
        self.state().is_connected()
    }

    /// Receiver that observes every state transition
    pub fn subscribe_state(&self) -> watch::Receiver<ConnectionState> {
        self.state_tx.subscribe()
    }

    /// Publish a new state, returning the previous one
    pub(crate) fn set_state(&self, state: ConnectionState) -> ConnectionState {
        let previous = self.state_tx.send_replace(state);
        if previous != state {
            tracing::debug!(endpoint = %self.endpoint, from = %previous, to = %state, "Connection state changed");
        }
        previous
    }

    // =========================================================================
    // Server metadata
    // =========================================================================

    /// Cached server metadata from the last successful fetch
    pub fn server_info(&self) -> Option<ServerInfo> {
        self.info.read().clone()
    }

    /// Server display name, or [`DISCONNECTED_SERVER_NAME`] when unknown
    pub fn server_name(&self) -> String {
        self.info
            .read()
            .as_ref()
            .map(|info| info.name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DISCONNECTED_SERVER_NAME.to_string())
    }

    /// Fetch server metadata and update the cache
    ///
    /// On failure the cache is cleared so the name falls back to
    /// [`DISCONNECTED_SERVER_NAME`].
    pub async fn refresh_server_info(&self) -> TransportResult<ServerInfo> {
        match self.client.server_info().await {
            Ok(info) => {
                *self.info.write() = Some(info.clone());
                Ok(info)
            }
            Err(e) => {
                *self.info.write() = None;
                Err(e)
            }
        }
    }

    /// Number of players currently online
    pub async fn online_player_count(&self) -> TransportResult<usize> {
        Ok(self.client.online_players().await?.len())
    }
}

impl std::fmt::Debug for ServerConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConnection")
            .field("endpoint", &self.endpoint)
            .field("state", &self.state())
            .field("history", &self.history.counts())
            .finish_non_exhaustive()
    }
}
