//! Bridge runtime
//!
//! Owns every configured server connection and one supervisor per server.
//! Servers keep their configuration order, which is also the index order of
//! the status API. Start-up never fails because a server is unreachable;
//! it only fails on entries that cannot be turned into a client at all.

use std::sync::Arc;

use bridge_client::{ClientConfig, ServerApiClient};
use bridge_common::BridgeConfig;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};

use super::RuntimeError;
use crate::connection::ServerConnection;
use crate::listeners::ListenerRegistry;
use crate::stream::ConsoleSource;
use crate::supervisor::{ConnectionSupervisor, SupervisorConfig, SupervisorHandle};

const DEFAULT_HISTORY_CAPACITY: usize = 500;

pub struct BridgeRuntime {
    registry: Arc<ListenerRegistry>,
    source: Arc<dyn ConsoleSource>,
    config: SupervisorConfig,
    history_capacity: usize,
    connections: DashMap<String, Arc<ServerConnection>>,
    order: RwLock<Vec<String>>,
    handles: Mutex<Vec<SupervisorHandle>>,
}

impl BridgeRuntime {
    pub fn new(
        registry: Arc<ListenerRegistry>,
        source: Arc<dyn ConsoleSource>,
        config: SupervisorConfig,
    ) -> Self {
        Self {
            registry,
            source,
            config,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            connections: DashMap::new(),
            order: RwLock::new(Vec::new()),
            handles: Mutex::new(Vec::new()),
        }
    }

    /// Build a runtime with one connection per configured server entry
    pub fn from_config(
        config: &BridgeConfig,
        registry: Arc<ListenerRegistry>,
        source: Arc<dyn ConsoleSource>,
    ) -> Result<Self, RuntimeError> {
        let mut runtime = Self::new(registry, source, SupervisorConfig::from(&config.stream));
        runtime.history_capacity = config.stream.history_capacity;

        for entry in &config.servers {
            let client = ServerApiClient::new(
                ClientConfig::new(&entry.uri, &entry.auth_key)
                    .with_request_timeout(config.stream.request_timeout())
                    .with_command_timeout(config.stream.command_timeout()),
            )?;
            runtime.add_server(ServerConnection::new(client, runtime.history_capacity))?;
        }

        Ok(runtime)
    }

    /// Register a connection; endpoints must be unique
    pub fn add_server(&self, server: Arc<ServerConnection>) -> Result<(), RuntimeError> {
        let endpoint = server.endpoint().to_string();
        let mut order = self.order.write();

        if self.connections.contains_key(&endpoint) {
            return Err(RuntimeError::DuplicateServer(endpoint));
        }

        self.connections.insert(endpoint.clone(), server);
        order.push(endpoint);
        Ok(())
    }

    pub fn history_capacity(&self) -> usize {
        self.history_capacity
    }

    /// Probe every server and launch its supervisor
    ///
    /// Servers already running are left alone.
    pub async fn start(&self) {
        let pending: Vec<Arc<ServerConnection>> = {
            let handles = self.handles.lock();
            self.connections()
                .into_iter()
                .filter(|server| {
                    !handles
                        .iter()
                        .any(|handle| handle.server().endpoint() == server.endpoint())
                })
                .collect()
        };

        for server in pending {
            let handle = ConnectionSupervisor::new(server, self.registry.clone(), self.source.clone())
                .with_config(self.config.clone())
                .start()
                .await;
            self.handles.lock().push(handle);
        }

        tracing::info!(servers = self.len(), "Bridge runtime started");
    }

    /// Connections in configuration order
    pub fn connections(&self) -> Vec<Arc<ServerConnection>> {
        self.order
            .read()
            .iter()
            .filter_map(|endpoint| self.connection(endpoint))
            .collect()
    }

    pub fn connection(&self, endpoint: &str) -> Option<Arc<ServerConnection>> {
        self.connections.get(endpoint).map(|entry| entry.value().clone())
    }

    pub fn connection_at(&self, index: usize) -> Option<Arc<ServerConnection>> {
        let endpoint = self.order.read().get(index).cloned()?;
        self.connection(&endpoint)
    }

    pub fn len(&self) -> usize {
        self.order.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of supervisors currently launched
    pub fn running(&self) -> usize {
        self.handles.lock().len()
    }

    /// Stop every supervisor, in configuration order
    pub async fn shutdown(&self) {
        let handles = std::mem::take(&mut *self.handles.lock());
        let count = handles.len();

        for handle in handles {
            handle.shutdown().await;
        }

        tracing::info!(supervisors = count, "Bridge runtime stopped");
    }
}
