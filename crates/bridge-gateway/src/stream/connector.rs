//! Event stream connector
//!
//! Turns console frames into dispatched events for one server:
//!
//! 1. parse the frame as a [`ConsoleRecord`]; malformed frames are dropped
//! 2. skip records older than the stale threshold
//! 3. classify; unclassified lines are ignored
//! 4. resolve the player identifier through the directory
//! 5. append to the rolling history, then dispatch to the registry
//!
//! Failures at any step are logged here and never end the stream.

use std::sync::Arc;

use bridge_core::{classify, ConsoleRecord, DomainEvent, EventKind};
use chrono::Utc;
use futures::StreamExt;

use super::{FrameStream, StreamError};
use crate::connection::ServerConnection;
use crate::listeners::ListenerRegistry;

/// Records older than this (milliseconds) never trigger side effects
pub const DEFAULT_STALE_AFTER_MS: i64 = 10_000;

/// What happened to one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Classified, recorded and handed to the listeners
    Dispatched(EventKind),
    /// Older than the stale threshold
    Stale,
    /// Parsed but matched no classification rule
    Ignored,
    /// Not a valid console record
    Dropped,
}

/// Processes console frames for one server
pub struct EventStreamConnector {
    server: Arc<ServerConnection>,
    registry: Arc<ListenerRegistry>,
    stale_after_ms: i64,
}

impl EventStreamConnector {
    pub fn new(server: Arc<ServerConnection>, registry: Arc<ListenerRegistry>) -> Self {
        Self {
            server,
            registry,
            stale_after_ms: DEFAULT_STALE_AFTER_MS,
        }
    }

    #[must_use]
    pub fn with_stale_after(mut self, stale_after_ms: i64) -> Self {
        self.stale_after_ms = stale_after_ms;
        self
    }

    pub fn server(&self) -> &Arc<ServerConnection> {
        &self.server
    }

    /// Consume frames until the stream ends or fails
    ///
    /// Each frame is fully processed, listeners included, before the next
    /// one is read. A clean end of stream returns `Ok(())`.
    pub async fn run(&self, mut frames: FrameStream) -> Result<(), StreamError> {
        while let Some(frame) = frames.next().await {
            let text = frame?;
            self.handle_frame(&text).await;
        }
        Ok(())
    }

    /// Process one frame against the current wall clock
    pub async fn handle_frame(&self, raw: &str) -> RecordOutcome {
        self.handle_frame_at(raw, Utc::now().timestamp_millis()).await
    }

    /// Process one frame as if the wall clock read `now_millis`
    pub async fn handle_frame_at(&self, raw: &str, now_millis: i64) -> RecordOutcome {
        let endpoint = self.server.endpoint();

        let record = match ConsoleRecord::parse(raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(endpoint, error = %e, "Dropping malformed console record");
                return RecordOutcome::Dropped;
            }
        };

        if record.is_stale(now_millis, self.stale_after_ms) {
            tracing::debug!(
                endpoint,
                age_ms = record.age_millis(now_millis),
                "Skipping stale console record"
            );
            return RecordOutcome::Stale;
        }

        let Some(classified) = classify(&record) else {
            tracing::trace!(endpoint, logger = %record.logger_name, "Unclassified console line");
            return RecordOutcome::Ignored;
        };
        let kind = classified.kind();

        let player_uuid = match self
            .server
            .directory()
            .resolve_by_name(classified.player_name())
            .await
        {
            Ok(uuid) => uuid,
            Err(e) => {
                tracing::warn!(
                    endpoint,
                    player = classified.player_name(),
                    error = %e,
                    "Player lookup failed, continuing without identifier"
                );
                None
            }
        };

        let event = DomainEvent::from_classified(classified, record, player_uuid);
        self.server.history().push(event.clone());

        tracing::trace!(
            endpoint,
            %kind,
            player = event.player_name(),
            "Dispatching console event"
        );

        if let Err(e) = self.registry.dispatch(&event, &self.server).await {
            tracing::error!(endpoint, %kind, error = %e, "Event listener failed");
        }

        RecordOutcome::Dispatched(kind)
    }
}
