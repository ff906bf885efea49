use crate::entry::LogEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate view over the store at one moment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total: usize,
    pub by_method: BTreeMap<String, usize>,
    /// Keyed by bucket label ("2xx", "4xx", ...).
    pub by_status: BTreeMap<String, usize>,
    /// Mean response time in ms; 0 when there are no entries.
    pub avg_response_time: f64,
    /// Up to ten errors (status >= 400) from the last 24 hours, newest first.
    pub recent_errors: Vec<LogEntry>,
}
