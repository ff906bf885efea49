use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One observed HTTP request/response cycle, as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Assigned by the store at insertion.
    pub id: String,

    pub method: String,

    pub url: String,

    pub status: u16,

    /// Elapsed time in milliseconds.
    pub response_time: f64,

    /// ISO-8601, kept exactly as the producer sent it.
    pub timestamp: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_headers: Option<HashMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_headers: Option<HashMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_body: Option<serde_json::Value>,

    /// Which upstream system produced the entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// A candidate entry as pushed by a producer: everything but the `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLogEntry {
    pub method: String,
    pub url: String,
    pub status: u16,
    #[serde(default)]
    pub response_time: f64,
    pub timestamp: String,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub request_headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub request_body: Option<serde_json::Value>,
    #[serde(default)]
    pub response_headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub response_body: Option<serde_json::Value>,
    #[serde(default)]
    pub source: Option<String>,
}

impl NewLogEntry {
    /// Minimal candidate with only the required fields set.
    pub fn new(
        method: impl Into<String>,
        url: impl Into<String>,
        status: u16,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            status,
            response_time: 0.0,
            timestamp: timestamp.into(),
            ip: None,
            user_agent: None,
            request_headers: None,
            request_body: None,
            response_headers: None,
            response_body: None,
            source: None,
        }
    }

    /// Attach the store-assigned id.
    pub fn with_id(self, id: String) -> LogEntry {
        LogEntry {
            id,
            method: self.method,
            url: self.url,
            status: self.status,
            response_time: self.response_time,
            timestamp: self.timestamp,
            ip: self.ip,
            user_agent: self.user_agent,
            request_headers: self.request_headers,
            request_body: self.request_body,
            response_headers: self.response_headers,
            response_body: self.response_body,
            source: self.source,
        }
    }
}

impl LogEntry {
    /// The entry's timestamp as a point in time, if it parses.
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }

    /// Status bucket label, e.g. `404` → `"4xx"`.
    pub fn status_bucket(&self) -> String {
        format!("{}xx", self.status / 100)
    }
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 with an offset, a naive date-time (read as UTC) and a
/// bare date (midnight UTC). Anything else is `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
