//! Rolling event history

mod event_history;

pub use event_history::{EventHistory, HistoryCounts};
