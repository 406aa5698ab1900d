//! Console record - one structured log line pushed over the console stream

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A single console line as delivered by the management plugin
///
/// Wire format: `{"timestampMillis": 1700000000000, "loggerName": "...", "message": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleRecord {
    /// Server-side time of the line, milliseconds since the Unix epoch
    pub timestamp_millis: i64,
    /// Source tag of the logger that produced the line
    #[serde(default)]
    pub logger_name: String,
    /// Free-text log line
    pub message: String,
}

impl ConsoleRecord {
    /// Create a new record
    pub fn new(
        timestamp_millis: i64,
        logger_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp_millis,
            logger_name: logger_name.into(),
            message: message.into(),
        }
    }

    /// Parse a raw stream frame
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        serde_json::from_str(raw).map_err(|e| DomainError::MalformedRecord(e.to_string()))
    }

    /// Server timestamp as a UTC datetime, if representable
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp_millis)
    }

    /// Age of the record relative to `now_millis`
    #[inline]
    pub fn age_millis(&self, now_millis: i64) -> i64 {
        now_millis.saturating_sub(self.timestamp_millis)
    }

    /// Whether the record is older than `max_age_millis`
    ///
    /// A record exactly `max_age_millis` old is still fresh.
    #[inline]
    pub fn is_stale(&self, now_millis: i64, max_age_millis: i64) -> bool {
        self.age_millis(now_millis) > max_age_millis
    }
}
