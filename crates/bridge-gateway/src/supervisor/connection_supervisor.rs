//! Connection supervisor
//!
//! Keeps one server's console stream alive:
//!
//! ```text
//! Disconnected -> Connecting -> Connected -> Disconnected -> (backoff) -> Connecting ...
//! ```
//!
//! Every termination, whether the peer closed the stream, the connection
//! was refused, the handshake was rejected or the transport failed, leads
//! to `Disconnected`, a fixed backoff and another attempt. Only an explicit
//! shutdown ends the loop.

use std::sync::Arc;
use std::time::Duration;

use bridge_common::StreamConfig;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::connection::{ConnectionState, ServerConnection};
use crate::listeners::ListenerRegistry;
use crate::stream::{ConsoleSource, EventStreamConnector, StreamError, DEFAULT_STALE_AFTER_MS};

/// Supervisor tuning
#[derive(Debug, Clone)]
pub struct SupervisorConfig {
    /// Wait between a termination and the next attempt
    pub reconnect_delay: Duration,
    /// Stale threshold handed to the connector
    pub stale_after_ms: i64,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            reconnect_delay: Duration::from_secs(10),
            stale_after_ms: DEFAULT_STALE_AFTER_MS,
        }
    }
}

impl From<&StreamConfig> for SupervisorConfig {
    fn from(stream: &StreamConfig) -> Self {
        Self {
            reconnect_delay: stream.reconnect_delay(),
            stale_after_ms: stream.stale_after_ms,
        }
    }
}

/// Owns the reconnect loop of one server
pub struct ConnectionSupervisor {
    server: Arc<ServerConnection>,
    registry: Arc<ListenerRegistry>,
    source: Arc<dyn ConsoleSource>,
    config: SupervisorConfig,
}

impl ConnectionSupervisor {
    pub fn new(
        server: Arc<ServerConnection>,
        registry: Arc<ListenerRegistry>,
        source: Arc<dyn ConsoleSource>,
    ) -> Self {
        Self {
            server,
            registry,
            source,
            config: SupervisorConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: SupervisorConfig) -> Self {
        self.config = config;
        self
    }

    /// Probe the server once, then spawn the reconnect loop
    pub async fn start(self) -> SupervisorHandle {
        self.probe().await;
        self.spawn()
    }

    /// Reachability check and metadata fetch; failures are logged only
    ///
    /// Returns whether the server answered the ping. Any HTTP response counts
    /// as reachable, a rejected key is reported separately.
    pub async fn probe(&self) -> bool {
        let endpoint = self.server.endpoint();

        let reachable = match self.server.client().ping().await {
            Ok(_) => {
                tracing::info!(endpoint, "Management API reachable");
                true
            }
            Err(e) if e.status().is_some() => {
                tracing::warn!(endpoint, status = e.status(), error = %e, "Management API reachable but rejected the request, please check the auth key");
                true
            }
            Err(e) => {
                tracing::warn!(endpoint, error = %e, "Management API unreachable, please check the server configuration");
                false
            }
        };

        match self.server.refresh_server_info().await {
            Ok(info) => tracing::info!(endpoint, name = %info.name, version = %info.version, "Server info loaded"),
            Err(e) => tracing::warn!(endpoint, error = %e, "Failed to load server info"),
        }

        reachable
    }

    /// Spawn the reconnect loop without probing
    pub fn spawn(self) -> SupervisorHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let server = self.server.clone();
        let task = tokio::spawn(self.run(shutdown_rx));

        SupervisorHandle {
            server,
            shutdown_tx,
            task,
        }
    }

    async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let endpoint = self.server.endpoint().to_string();
        let connector = EventStreamConnector::new(self.server.clone(), self.registry.clone())
            .with_stale_after(self.config.stale_after_ms);
        let mut attempt: u64 = 0;

        tracing::info!(endpoint = %endpoint, "Connection supervisor started");

        loop {
            if *shutdown.borrow() {
                break;
            }

            attempt += 1;
            self.server.set_state(ConnectionState::Connecting);
            tracing::debug!(endpoint = %endpoint, attempt, "Opening console stream");

            let result = tokio::select! {
                result = self.connect_and_stream(&connector) => result,
                _ = shutdown.changed() => break,
            };

            self.server.set_state(ConnectionState::Disconnected);
            match result {
                Ok(()) => {
                    tracing::warn!(endpoint = %endpoint, "Console stream closed, reconnecting");
                }
                Err(e) if e.is_transient() => {
                    tracing::warn!(endpoint = %endpoint, error = %e, "Console stream lost, reconnecting");
                }
                Err(e) => {
                    tracing::error!(endpoint = %endpoint, error = %e, "Console stream failed, reconnecting");
                }
            }

            tokio::select! {
                () = tokio::time::sleep(self.config.reconnect_delay) => {}
                _ = shutdown.changed() => break,
            }
        }

        self.server.set_state(ConnectionState::Disconnected);
        tracing::info!(endpoint = %endpoint, attempts = attempt, "Connection supervisor stopped");
    }

    async fn connect_and_stream(&self, connector: &EventStreamConnector) -> Result<(), StreamError> {
        let frames = self.source.open(&self.server).await?;

        self.server.set_state(ConnectionState::Connected);
        tracing::info!(endpoint = self.server.endpoint(), "Console stream connected");

        connector.run(frames).await
    }
}

/// Handle to a running supervisor
///
/// Dropping the handle also stops the loop at its next suspension point.
pub struct SupervisorHandle {
    server: Arc<ServerConnection>,
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SupervisorHandle {
    pub fn server(&self) -> &Arc<ServerConnection> {
        &self.server
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Signal the loop to stop and wait for it to finish
    pub async fn shutdown(self) {
        // The loop may already be gone; nothing to signal then
        let _ = self.shutdown_tx.send(true);

        if let Err(e) = self.task.await {
            tracing::error!(endpoint = self.server.endpoint(), error = %e, "Supervisor task failed");
        }
    }
}

impl std::fmt::Debug for SupervisorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupervisorHandle")
            .field("endpoint", &self.server.endpoint())
            .field("finished", &self.task.is_finished())
            .finish()
    }
}
