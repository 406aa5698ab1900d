//! Player directory backed by the server roster.
//!
//! Lookups scan the cached roster first. A miss triggers exactly one full
//! refresh (the cached roster is replaced wholesale) and one re-scan.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bridge_core::{DomainError, DomainResult, PlayerRecord, RosterSource};
use parking_lot::RwLock;

/// Name <-> identifier cache for one server
pub struct PlayerDirectory {
    source: Arc<dyn RosterSource>,
    players: RwLock<Vec<PlayerRecord>>,
    refreshes: AtomicU64,
}

impl PlayerDirectory {
    /// Create an empty directory; the first lookup populates it
    #[must_use]
    pub fn new(source: Arc<dyn RosterSource>) -> Self {
        Self::with_players(source, Vec::new())
    }

    /// Create a directory seeded with a known roster
    #[must_use]
    pub fn with_players(source: Arc<dyn RosterSource>, players: Vec<PlayerRecord>) -> Self {
        Self {
            source,
            players: RwLock::new(players),
            refreshes: AtomicU64::new(0),
        }
    }

    /// Copy of the cached roster
    pub fn snapshot(&self) -> Vec<PlayerRecord> {
        self.players.read().clone()
    }

    pub fn len(&self) -> usize {
        self.players.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.read().is_empty()
    }

    /// Number of completed roster refreshes
    pub fn refresh_count(&self) -> u64 {
        self.refreshes.load(Ordering::Relaxed)
    }

    /// Replace the cached roster with a fresh copy from the server
    ///
    /// # Errors
    /// Returns `DomainError::Upstream` if the roster cannot be fetched; the
    /// cached roster is left untouched in that case
    pub async fn refresh(&self) -> DomainResult<usize> {
        let roster = self.source.fetch_roster().await?;
        let count = roster.len();

        *self.players.write() = roster;
        self.refreshes.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(players = count, "Player roster refreshed");
        Ok(count)
    }

    /// Case-insensitive name lookup
    ///
    /// Returns `Ok(None)` when the player is unknown even after a refresh.
    pub async fn resolve_by_name(&self, name: &str) -> DomainResult<Option<String>> {
        if let Some(uuid) = self.find_uuid(name) {
            return Ok(Some(uuid));
        }

        self.refresh().await?;
        Ok(self.find_uuid(name))
    }

    /// Exact identifier lookup
    ///
    /// # Errors
    /// Returns `DomainError::PlayerNotFound` when the identifier is unknown
    /// even after a refresh
    pub async fn resolve_by_identifier(&self, uuid: &str) -> DomainResult<String> {
        if let Some(name) = self.find_name(uuid) {
            return Ok(name);
        }

        self.refresh().await?;
        self.find_name(uuid)
            .ok_or_else(|| DomainError::PlayerNotFound(uuid.to_string()))
    }

    fn find_uuid(&self, name: &str) -> Option<String> {
        self.players
            .read()
            .iter()
            .find(|p| p.matches_name(name))
            .map(|p| p.uuid.clone())
    }

    fn find_name(&self, uuid: &str) -> Option<String> {
        self.players
            .read()
            .iter()
            .find(|p| p.matches_uuid(uuid))
            .map(|p| p.name.clone())
    }
}

impl std::fmt::Debug for PlayerDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerDirectory")
            .field("players", &self.len())
            .field("refreshes", &self.refresh_count())
            .finish_non_exhaustive()
    }
}
