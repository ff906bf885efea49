use chrono::{Duration, Utc};
use reqlog_core::{LogFilter, NewLogEntry};
use reqlog_store::LogStore;
use reqlog_store::seed::sample_entries;
use std::collections::HashSet;
use std::sync::Arc;

// =============================================================================
// Helper Functions
// =============================================================================

fn empty_store(max_logs: usize) -> LogStore {
    LogStore::with_seed(max_logs, Vec::new)
}

fn entry(method: &str, url: &str, status: u16) -> NewLogEntry {
    NewLogEntry::new(method, url, status, Utc::now().to_rfc3339())
}

// =============================================================================
// Capacity & Ordering
// =============================================================================

#[test]
fn test_capacity_bound_with_1200_inserts() {
    let store = empty_store(1000);
    let first_id = store.add_log(entry("GET", "/0", 200));
    let mut last_id = String::new();
    for i in 1..1200 {
        last_id = store.add_log(entry("GET", &format!("/{i}"), 200));
        assert!(store.len() <= 1000);
    }

    let logs = store.get_logs();
    assert_eq!(logs.len(), 1000);
    assert!(logs.iter().all(|e| e.id != first_id));
    assert_eq!(logs[0].id, last_id);
    // Exactly the oldest 200 are gone
    assert_eq!(logs[999].url, "/200");
}

#[test]
fn test_default_store_includes_seed_in_capacity() {
    let store = LogStore::new(5);
    for i in 0..10 {
        store.add_log(entry("GET", &format!("/{i}"), 200));
    }
    assert_eq!(store.len(), 5);
    assert_eq!(store.get_logs()[0].url, "/9");
}

#[test]
fn test_ids_are_unique() {
    let store = empty_store(500);
    for i in 0..500 {
        store.add_log(entry("GET", &format!("/{i}"), 200));
    }
    let ids: HashSet<_> = store.get_logs().into_iter().map(|e| e.id).collect();
    assert_eq!(ids.len(), 500);
}

#[test]
fn test_get_logs_is_newest_first() {
    let store = empty_store(100);
    for i in 0..20 {
        store.add_log(entry("GET", &format!("/{i}"), 200));
    }
    let order: Vec<usize> = store
        .get_logs()
        .iter()
        .map(|e| e.url[1..].parse().unwrap())
        .collect();
    assert!(order.windows(2).all(|w| w[0] > w[1]));
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn test_empty_filter_equals_get_logs() {
    let store = LogStore::new(100);
    store.add_log(entry("GET", "/a", 200));
    store.add_log(entry("POST", "/b", 500));
    assert_eq!(store.filter_logs(&LogFilter::default()), store.get_logs());
}

#[test]
fn test_filter_by_method_preserves_order() {
    let store = empty_store(100);
    store.add_log(entry("GET", "/1", 200));
    store.add_log(entry("POST", "/2", 200));
    store.add_log(entry("GET", "/3", 200));

    let filter = LogFilter { method: Some("GET".into()), ..Default::default() };
    let urls: Vec<_> = store.filter_logs(&filter).into_iter().map(|e| e.url).collect();
    assert_eq!(urls, vec!["/3", "/1"]);
}

#[test]
fn test_filter_on_empty_store_returns_nothing() {
    let store = empty_store(10);
    let filter = LogFilter { status: Some(200), ..Default::default() };
    assert!(store.filter_logs(&filter).is_empty());
    assert!(store.filter_logs(&LogFilter::default()).is_empty());
}

#[test]
fn test_filter_by_time_range() {
    let now = Utc::now();
    let store = empty_store(10);
    for hours in [48, 12, 1] {
        store.add_log(NewLogEntry::new(
            "GET",
            format!("/{hours}h"),
            200,
            (now - Duration::hours(hours)).to_rfc3339(),
        ));
    }
    let filter = LogFilter {
        from: Some(now - Duration::hours(24)),
        to: Some(now - Duration::hours(2)),
        ..Default::default()
    };
    let urls: Vec<_> = store.filter_logs(&filter).into_iter().map(|e| e.url).collect();
    assert_eq!(urls, vec!["/12h"]);
}

// =============================================================================
// Stats
// =============================================================================

#[test]
fn test_status_buckets() {
    let store = empty_store(10);
    for status in [200, 404, 500] {
        store.add_log(entry("GET", "/", status));
    }
    let stats = store.stats();
    assert_eq!(stats.by_status.len(), 3);
    assert_eq!(stats.by_status["2xx"], 1);
    assert_eq!(stats.by_status["4xx"], 1);
    assert_eq!(stats.by_status["5xx"], 1);
    assert_eq!(stats.by_method["GET"], 3);
}

#[test]
fn test_old_error_is_not_recent() {
    let store = empty_store(10);
    store.add_log(NewLogEntry::new(
        "GET",
        "/old",
        500,
        (Utc::now() - Duration::hours(25)).to_rfc3339(),
    ));
    let stats = store.stats();
    assert_eq!(stats.total, 1);
    assert!(stats.recent_errors.is_empty());
}

#[test]
fn test_stats_serialize_camel_case() {
    let store = empty_store(10);
    store.add_log(entry("GET", "/", 500));
    let json = serde_json::to_value(store.stats()).unwrap();
    assert_eq!(json["total"], 1);
    assert_eq!(json["byStatus"]["5xx"], 1);
    assert_eq!(json["byMethod"]["GET"], 1);
    assert!(json["avgResponseTime"].is_number());
    assert_eq!(json["recentErrors"].as_array().unwrap().len(), 1);
}

// =============================================================================
// Clear
// =============================================================================

#[test]
fn test_clear_yields_seed_not_empty() {
    let store = LogStore::new(1000);
    for i in 0..50 {
        store.add_log(entry("DELETE", &format!("/{i}"), 204));
    }
    store.clear_logs();
    let logs = store.get_logs();
    let seed = sample_entries();
    assert!(!logs.is_empty());
    assert_eq!(logs.len(), seed.len());
    for (held, sample) in logs.iter().rev().zip(seed.iter()) {
        assert_eq!(held.method, sample.method);
        assert_eq!(held.url, sample.url);
        assert_eq!(held.status, sample.status);
    }
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_concurrent_writers_respect_bound() {
    let store = Arc::new(empty_store(100));
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..200 {
                    store.add_log(entry("GET", &format!("/{t}/{i}"), 200));
                    if i % 50 == 0 {
                        let _ = store.stats();
                    }
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(store.len(), 100);
    let ids: HashSet<_> = store.get_logs().into_iter().map(|e| e.id).collect();
    assert_eq!(ids.len(), 100);
}
