//! Initial contents of a fresh (or freshly cleared) store.
//!
//! The dashboard should never come up blank, so the store is populated
//! with a small illustrative set both at construction and after every
//! clear. Timestamps are taken at seeding time.

use chrono::Utc;
use reqlog_core::NewLogEntry;
use serde_json::json;
use std::collections::HashMap;

/// The sample entries, oldest first.
pub fn sample_entries() -> Vec<NewLogEntry> {
    let now = Utc::now().to_rfc3339();

    let mut quotation = NewLogEntry::new("GET", "/api/public/quotation", 200, now);
    quotation.response_time = 120.0;
    quotation.ip = Some("127.0.0.1".into());
    quotation.user_agent = Some("Mozilla/5.0 (Example)".into());
    quotation.source = Some("main-backend".into());
    quotation.request_headers = Some(HashMap::from([
        ("accept".to_string(), "application/json".to_string()),
        (
            "user-agent".to_string(),
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64)".to_string(),
        ),
    ]));
    quotation.request_body = Some(serde_json::Value::Null);
    quotation.response_headers = Some(HashMap::from([
        ("content-type".to_string(), "application/json".to_string()),
        ("x-powered-by".to_string(), "Express".to_string()),
    ]));
    quotation.response_body = Some(json!({
        "success": true,
        "data": {
            "plans": [
                { "id": 1, "name": "Plan Básico", "price": 5000 },
                { "id": 2, "name": "Plan Premium", "price": 8000 }
            ]
        }
    }));

    vec![quotation]
}
