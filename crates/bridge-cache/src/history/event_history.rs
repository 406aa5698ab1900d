//! Rolling logs of console events, one per event kind

use std::collections::{HashMap, VecDeque};

use bridge_core::{DomainEvent, EventKind};
use parking_lot::RwLock;
use serde::Serialize;

/// Per-kind entry counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HistoryCounts {
    pub chat: usize,
    pub login: usize,
    pub logout: usize,
    pub command: usize,
}

/// Rolling event logs; the oldest entry is evicted once a log is full
#[derive(Debug)]
pub struct EventHistory {
    /// `None` keeps every event
    capacity: Option<usize>,
    logs: RwLock<HashMap<EventKind, VecDeque<DomainEvent>>>,
}

impl EventHistory {
    /// Create empty logs holding at most `capacity` events each
    ///
    /// A capacity of zero leaves the logs unbounded.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: (capacity > 0).then_some(capacity),
            logs: RwLock::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Append an event to the log of its kind
    pub fn push(&self, event: DomainEvent) {
        let mut logs = self.logs.write();
        let log = logs.entry(event.kind()).or_default();
        if self.capacity.is_some_and(|capacity| log.len() >= capacity) {
            log.pop_front();
        }
        log.push_back(event);
    }

    /// Up to `limit` most recent events of a kind, oldest first
    pub fn recent(&self, kind: EventKind, limit: usize) -> Vec<DomainEvent> {
        let logs = self.logs.read();
        logs.get(&kind)
            .map(|log| {
                let skip = log.len().saturating_sub(limit);
                log.iter().skip(skip).cloned().collect()
            })
            .unwrap_or_default()
    }

    pub fn len(&self, kind: EventKind) -> usize {
        self.logs.read().get(&kind).map_or(0, VecDeque::len)
    }

    pub fn counts(&self) -> HistoryCounts {
        HistoryCounts {
            chat: self.len(EventKind::PlayerChat),
            login: self.len(EventKind::PlayerLogin),
            logout: self.len(EventKind::PlayerDisconnect),
            command: self.len(EventKind::CommandIssued),
        }
    }

    pub fn clear(&self) {
        self.logs.write().clear();
    }
}
