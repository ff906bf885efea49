use crate::entry::{LogEntry, parse_timestamp};
use crate::error::ReqlogError;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Query criteria, AND-composed. `None` means no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LogFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Case-sensitive substring of the url.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Inclusive lower time bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper time bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
}

impl LogFilter {
    pub fn is_empty(&self) -> bool {
        *self == LogFilter::default()
    }

    /// Does `entry` satisfy every supplied criterion?
    ///
    /// An entry whose own timestamp does not parse fails any time bound.
    pub fn matches(&self, entry: &LogEntry) -> bool {
        if let Some(ref method) = self.method {
            if entry.method != *method {
                return false;
            }
        }
        if let Some(ref url) = self.url {
            if !entry.url.contains(url.as_str()) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if entry.status != status {
                return false;
            }
        }
        if let Some(ref source) = self.source {
            if entry.source.as_deref() != Some(source.as_str()) {
                return false;
            }
        }
        if self.from.is_some() || self.to.is_some() {
            let Some(at) = entry.parsed_timestamp() else {
                return false;
            };
            if self.from.is_some_and(|from| at < from) {
                return false;
            }
            if self.to.is_some_and(|to| at > to) {
                return false;
            }
        }
        true
    }
}

/// Raw, string-typed query parameters as they arrive on the wire.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct RawLogQuery {
    pub method: Option<String>,
    pub url: Option<String>,
    pub status: Option<String>,
    pub source: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

/// Default number of entries a query returns.
pub const DEFAULT_QUERY_LIMIT: i64 = 100;

impl RawLogQuery {
    /// Parse into typed criteria plus a result limit.
    ///
    /// Empty strings and `status=0` count as "not supplied". Anything
    /// present but unparsable is rejected rather than silently ignored. A
    /// limit of zero or less means no truncation and is returned as `None`.
    pub fn parse(&self) -> Result<(LogFilter, Option<usize>), ReqlogError> {
        let status = match non_empty(&self.status) {
            Some(raw) => Some(raw.trim().parse::<u16>().map_err(|_| {
                ReqlogError::InvalidFilter {
                    param: "status",
                    reason: format!("expected an HTTP status code, got '{raw}'"),
                }
            })?),
            None => None,
        }
        .filter(|code| *code != 0);

        let filter = LogFilter {
            method: non_empty(&self.method).map(str::to_string),
            url: non_empty(&self.url).map(str::to_string),
            status,
            source: non_empty(&self.source).map(str::to_string),
            from: parse_bound("from", non_empty(&self.from))?,
            to: parse_bound("to", non_empty(&self.to))?,
        };

        let limit = match non_empty(&self.limit) {
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| ReqlogError::InvalidFilter {
                param: "limit",
                reason: format!("expected an integer, got '{raw}'"),
            })?,
            None => DEFAULT_QUERY_LIMIT,
        };
        let limit = usize::try_from(limit).ok().filter(|n| *n > 0);

        Ok((filter, limit))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn parse_bound(
    param: &'static str,
    raw: Option<&str>,
) -> Result<Option<DateTime<Utc>>, ReqlogError> {
    match raw {
        None => Ok(None),
        Some(raw) => parse_timestamp(raw)
            .map(Some)
            .ok_or_else(|| ReqlogError::InvalidFilter {
                param,
                reason: format!("expected an ISO-8601 timestamp, got '{raw}'"),
            }),
    }
}
