//! Listener registry
//!
//! Maps each event kind to an ordered list of listeners. Registration order
//! is dispatch order and duplicates are invoked twice. The registry is
//! built before any connection starts and shared read-only afterwards.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use bridge_core::{DomainEvent, EventKind};

use super::error::HandlerResult;
use crate::connection::ServerConnection;

/// Reacts to one kind of console event
#[async_trait]
pub trait EventListener: Send + Sync {
    async fn handle(&self, event: &DomainEvent, server: &Arc<ServerConnection>)
        -> HandlerResult<()>;

    /// Name used in logs
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Adapter for closure listeners
struct FnListener<F> {
    f: F,
}

#[async_trait]
impl<F, Fut> EventListener for FnListener<F>
where
    F: Fn(DomainEvent, Arc<ServerConnection>) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult<()>> + Send,
{
    async fn handle(
        &self,
        event: &DomainEvent,
        server: &Arc<ServerConnection>,
    ) -> HandlerResult<()> {
        (self.f)(event.clone(), server.clone()).await
    }

    fn name(&self) -> &str {
        "closure"
    }
}

/// Event kind -> ordered listeners
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: HashMap<EventKind, Vec<Arc<dyn EventListener>>>,
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener for `kind`
    pub fn register(&mut self, kind: EventKind, listener: Arc<dyn EventListener>) -> &mut Self {
        tracing::debug!(%kind, listener = listener.name(), "Listener registered");
        self.listeners.entry(kind).or_default().push(listener);
        self
    }

    /// Append a closure listener for `kind`
    ///
    /// ```rust,ignore
    /// registry.register_fn(EventKind::PlayerLogin, |event, server| async move {
    ///     server.client().broadcast(&format!("hi {}", event.player_name())).await?;
    ///     Ok(())
    /// });
    /// ```
    pub fn register_fn<F, Fut>(&mut self, kind: EventKind, f: F) -> &mut Self
    where
        F: Fn(DomainEvent, Arc<ServerConnection>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult<()>> + Send + 'static,
    {
        self.register(kind, Arc::new(FnListener { f }))
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.values().all(Vec::is_empty)
    }

    /// Run every listener registered for the event's kind, in order
    ///
    /// Each listener is awaited before the next starts. The first failure
    /// stops this dispatch and is returned; listeners after it are skipped
    /// for this event only. Returns the number of listeners that ran.
    pub async fn dispatch(
        &self,
        event: &DomainEvent,
        server: &Arc<ServerConnection>,
    ) -> HandlerResult<usize> {
        let Some(listeners) = self.listeners.get(&event.kind()) else {
            return Ok(0);
        };

        for (index, listener) in listeners.iter().enumerate() {
            if let Err(e) = listener.handle(event, server).await {
                tracing::debug!(
                    kind = %event.kind(),
                    listener = listener.name(),
                    skipped = listeners.len() - index - 1,
                    "Listener failed, skipping the rest"
                );
                return Err(e);
            }
        }

        Ok(listeners.len())
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<_, _> = self
            .listeners
            .iter()
            .map(|(kind, listeners)| (kind.as_str(), listeners.len()))
            .collect();
        f.debug_struct("ListenerRegistry")
            .field("listeners", &counts)
            .finish()
    }
}
