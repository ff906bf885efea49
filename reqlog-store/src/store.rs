use crate::seed;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use reqlog_core::{LogEntry, LogFilter, NewLogEntry, StatsSnapshot};
use std::collections::VecDeque;
use tracing::debug;
use uuid::Uuid;

/// How many recent errors a stats snapshot carries.
const RECENT_ERRORS_CAP: usize = 10;

/// Produces the entries a store starts with (and returns to on clear).
pub type SeedFn = fn() -> Vec<NewLogEntry>;

/// Bounded, newest-first in-memory log collection.
///
/// Shared between request handlers behind an `Arc`. Every mutation holds
/// the write lock for its whole read-modify-write, so eviction and
/// re-seeding are never observed half done.
pub struct LogStore {
    /// Front = newest.
    entries: RwLock<VecDeque<LogEntry>>,
    max_logs: usize,
    seed: SeedFn,
}

impl LogStore {
    /// A store holding at most `max_logs` entries, pre-populated with the
    /// sample entries.
    pub fn new(max_logs: usize) -> Self {
        Self::with_seed(max_logs, seed::sample_entries)
    }

    /// A store with a custom seed policy.
    pub fn with_seed(max_logs: usize, seed: SeedFn) -> Self {
        let store = Self {
            entries: RwLock::new(VecDeque::with_capacity(max_logs.min(4096))),
            max_logs,
            seed,
        };
        store.reseed(&mut store.entries.write());
        store
    }

    pub fn max_logs(&self) -> usize {
        self.max_logs
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Insert one entry as the newest, evicting from the tail past the bound.
    /// Returns the assigned id.
    pub fn add_log(&self, entry: NewLogEntry) -> String {
        let mut entries = self.entries.write();
        self.insert(&mut entries, entry)
    }

    /// Insert a batch in order under one lock acquisition; the last item
    /// ends up newest. Returns how many were inserted.
    pub fn add_logs<I>(&self, batch: I) -> usize
    where
        I: IntoIterator<Item = NewLogEntry>,
    {
        let mut entries = self.entries.write();
        let mut count = 0;
        for entry in batch {
            self.insert(&mut entries, entry);
            count += 1;
        }
        count
    }

    /// Snapshot of every entry, newest first.
    pub fn get_logs(&self) -> Vec<LogEntry> {
        self.entries.read().iter().cloned().collect()
    }

    /// The `n` newest entries.
    pub fn recent(&self, n: usize) -> Vec<LogEntry> {
        self.entries.read().iter().take(n).cloned().collect()
    }

    /// Entries matching `filter`, newest first.
    pub fn filter_logs(&self, filter: &LogFilter) -> Vec<LogEntry> {
        self.entries
            .read()
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect()
    }

    /// Drop everything and restore the seed entries.
    pub fn clear_logs(&self) {
        let mut entries = self.entries.write();
        entries.clear();
        self.reseed(&mut entries);
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats_at(Utc::now())
    }

    /// Stats with the "last 24 hours" window anchored at `now`.
    pub fn stats_at(&self, now: DateTime<Utc>) -> StatsSnapshot {
        let entries = self.entries.read();
        let window_start = now - Duration::hours(24);

        let mut stats = StatsSnapshot {
            total: entries.len(),
            ..Default::default()
        };
        let mut response_time_sum = 0.0;

        for entry in entries.iter() {
            *stats.by_method.entry(entry.method.clone()).or_insert(0) += 1;
            *stats.by_status.entry(entry.status_bucket()).or_insert(0) += 1;
            response_time_sum += entry.response_time;

            if entry.status >= 400
                && stats.recent_errors.len() < RECENT_ERRORS_CAP
                && entry
                    .parsed_timestamp()
                    .is_some_and(|at| at > window_start)
            {
                stats.recent_errors.push(entry.clone());
            }
        }

        if !entries.is_empty() {
            stats.avg_response_time = response_time_sum / entries.len() as f64;
        }
        stats
    }

    fn insert(&self, entries: &mut VecDeque<LogEntry>, entry: NewLogEntry) -> String {
        let id = Uuid::new_v4().to_string();
        entries.push_front(entry.with_id(id.clone()));
        if entries.len() > self.max_logs {
            entries.truncate(self.max_logs);
        }
        id
    }

    fn reseed(&self, entries: &mut VecDeque<LogEntry>) {
        let samples = (self.seed)();
        debug!(count = samples.len(), "Seeding log store");
        for entry in samples {
            self.insert(entries, entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_store(max_logs: usize) -> LogStore {
        LogStore::with_seed(max_logs, Vec::new)
    }

    fn at(ts: DateTime<Utc>, method: &str, status: u16) -> NewLogEntry {
        NewLogEntry::new(method, "/t", status, ts.to_rfc3339())
    }

    #[test]
    fn new_store_is_seeded() {
        let store = LogStore::new(1000);
        assert_eq!(store.len(), seed::sample_entries().len());
    }

    #[test]
    fn add_log_puts_newest_first() {
        let store = empty_store(10);
        let first = store.add_log(NewLogEntry::new("GET", "/a", 200, "2024-01-01"));
        let second = store.add_log(NewLogEntry::new("GET", "/b", 200, "2024-01-01"));
        let logs = store.get_logs();
        assert_eq!(logs[0].id, second);
        assert_eq!(logs[1].id, first);
    }

    #[test]
    fn eviction_drops_the_oldest() {
        let store = empty_store(3);
        for i in 0..5 {
            store.add_log(NewLogEntry::new("GET", format!("/{i}"), 200, "2024-01-01"));
        }
        let urls: Vec<_> = store.get_logs().into_iter().map(|e| e.url).collect();
        assert_eq!(urls, vec!["/4", "/3", "/2"]);
    }

    #[test]
    fn seed_respects_capacity() {
        fn three() -> Vec<NewLogEntry> {
            (0..3)
                .map(|i| NewLogEntry::new("GET", format!("/seed/{i}"), 200, "2024-01-01"))
                .collect()
        }
        let store = LogStore::with_seed(2, three);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get_logs()[0].url, "/seed/2");
    }

    #[test]
    fn add_logs_inserts_in_order() {
        let store = empty_store(10);
        let n = store.add_logs(vec![
            NewLogEntry::new("GET", "/1", 200, "2024-01-01"),
            NewLogEntry::new("GET", "/2", 200, "2024-01-01"),
        ]);
        assert_eq!(n, 2);
        assert_eq!(store.get_logs()[0].url, "/2");
    }

    #[test]
    fn recent_takes_from_the_front() {
        let store = empty_store(10);
        for i in 0..5 {
            store.add_log(NewLogEntry::new("GET", format!("/{i}"), 200, "2024-01-01"));
        }
        let urls: Vec<_> = store.recent(2).into_iter().map(|e| e.url).collect();
        assert_eq!(urls, vec!["/4", "/3"]);
        assert_eq!(store.recent(50).len(), 5);
    }

    #[test]
    fn stats_on_empty_store_are_zeroed() {
        let stats = empty_store(10).stats();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.avg_response_time, 0.0);
        assert!(stats.by_method.is_empty());
        assert!(stats.by_status.is_empty());
        assert!(stats.recent_errors.is_empty());
    }

    #[test]
    fn stats_average_response_time() {
        let store = empty_store(10);
        for rt in [10.0, 20.0, 60.0] {
            let mut e = NewLogEntry::new("GET", "/", 200, "2024-01-01");
            e.response_time = rt;
            store.add_log(e);
        }
        assert_eq!(store.stats().avg_response_time, 30.0);
    }

    #[test]
    fn recent_errors_window_is_24_hours() {
        let now = Utc::now();
        let store = empty_store(10);
        store.add_log(at(now - Duration::hours(25), "GET", 500));
        store.add_log(at(now - Duration::hours(23), "GET", 503));
        store.add_log(at(now - Duration::minutes(5), "GET", 200));

        let stats = store.stats_at(now);
        assert_eq!(stats.recent_errors.len(), 1);
        assert_eq!(stats.recent_errors[0].status, 503);
    }

    #[test]
    fn recent_errors_are_capped_at_ten_newest() {
        let now = Utc::now();
        let store = empty_store(100);
        for i in 0..15 {
            let mut e = at(now - Duration::minutes(30 - i), "GET", 404);
            e.url = format!("/{i}");
            store.add_log(e);
        }
        let errors = store.stats_at(now).recent_errors;
        assert_eq!(errors.len(), 10);
        assert_eq!(errors[0].url, "/14");
        assert_eq!(errors[9].url, "/5");
    }

    #[test]
    fn unparsable_timestamps_are_never_recent() {
        let store = empty_store(10);
        store.add_log(NewLogEntry::new("GET", "/", 500, "not-a-date"));
        let stats = store.stats();
        assert_eq!(stats.total, 1);
        assert!(stats.recent_errors.is_empty());
    }

    #[test]
    fn clear_restores_the_seed() {
        let store = LogStore::new(100);
        for _ in 0..20 {
            store.add_log(NewLogEntry::new("POST", "/x", 201, "2024-01-01"));
        }
        store.clear_logs();
        let logs = store.get_logs();
        assert_eq!(logs.len(), seed::sample_entries().len());
        assert!(logs.iter().all(|e| e.method != "POST"));
    }
}
