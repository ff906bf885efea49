#[cfg(feature = "prometheus")]
pub mod metrics;

#[cfg(feature = "prometheus")]
pub mod prometheus_exporter;

pub mod process;

#[cfg(feature = "prometheus")]
pub use metrics::MetricsCollector;

pub use process::{format_megabytes, resident_memory_bytes};

/// Without the `prometheus` feature the collector is a zero-sized no-op
/// with the same surface, so callers never need their own cfg gates.
#[cfg(not(feature = "prometheus"))]
pub struct MetricsCollector;

#[cfg(not(feature = "prometheus"))]
impl MetricsCollector {
    pub fn new(_enabled: bool) -> anyhow::Result<Self> {
        Ok(Self)
    }
    pub fn disabled() -> Self {
        Self
    }
    #[inline]
    pub fn record_ingest(&self, _kind: &str, _count: usize) {}
    #[inline]
    pub fn record_rejected(&self, _kind: &str) {}
    #[inline]
    pub fn record_query(&self) {}
    #[inline]
    pub fn record_clear(&self) {}
    #[inline]
    pub fn set_store_size(&self, _size: usize) {}
    pub fn render(&self) -> String {
        String::new()
    }
    pub fn is_enabled(&self) -> bool {
        false
    }
}
