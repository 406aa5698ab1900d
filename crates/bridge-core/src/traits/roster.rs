//! Roster source - where the player directory gets its data

use async_trait::async_trait;

use crate::entities::PlayerRecord;
use crate::error::DomainResult;

#[async_trait]
pub trait RosterSource: Send + Sync {
    /// Fetch every player the server has ever seen
    ///
    /// Failures are reported as `DomainError::Upstream`.
    async fn fetch_roster(&self) -> DomainResult<Vec<PlayerRecord>>;
}
