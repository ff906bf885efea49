use crate::prometheus_exporter::render_metrics;
use prometheus::{IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use tracing::debug;

/// Collector metrics — everything is gated behind `enabled`.
///
/// When disabled no registry is created and every `record_*` call returns
/// immediately.
pub struct MetricsCollector {
    enabled: bool,
    registry: Option<Registry>,
    pub ingested_total: Option<IntCounterVec>,
    pub rejected_total: Option<IntCounterVec>,
    pub queries_total: Option<IntCounter>,
    pub clears_total: Option<IntCounter>,
    pub store_size: Option<IntGauge>,
}

impl MetricsCollector {
    /// Create a new collector. When `enabled = false`, everything is None.
    pub fn new(enabled: bool) -> anyhow::Result<Self> {
        if !enabled {
            return Ok(Self::disabled());
        }

        let registry = Registry::new();

        let ingested_total = IntCounterVec::new(
            Opts::new("ingested_entries_total", "Log entries accepted into the store")
                .namespace("reqlog"),
            &["kind"],
        )?;
        let rejected_total = IntCounterVec::new(
            Opts::new("rejected_payloads_total", "Ingest payloads rejected at validation")
                .namespace("reqlog"),
            &["kind"],
        )?;
        let queries_total = IntCounter::with_opts(
            Opts::new("queries_total", "Filtered log queries served").namespace("reqlog"),
        )?;
        let clears_total = IntCounter::with_opts(
            Opts::new("clears_total", "Times the store was cleared").namespace("reqlog"),
        )?;
        let store_size = IntGauge::with_opts(
            Opts::new("store_entries", "Entries currently held").namespace("reqlog"),
        )?;

        registry.register(Box::new(ingested_total.clone()))?;
        registry.register(Box::new(rejected_total.clone()))?;
        registry.register(Box::new(queries_total.clone()))?;
        registry.register(Box::new(clears_total.clone()))?;
        registry.register(Box::new(store_size.clone()))?;

        debug!("Prometheus metrics registered");

        Ok(Self {
            enabled: true,
            registry: Some(registry),
            ingested_total: Some(ingested_total),
            rejected_total: Some(rejected_total),
            queries_total: Some(queries_total),
            clears_total: Some(clears_total),
            store_size: Some(store_size),
        })
    }

    /// No-op collector.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            registry: None,
            ingested_total: None,
            rejected_total: None,
            queries_total: None,
            clears_total: None,
            store_size: None,
        }
    }

    /// Count accepted entries; `kind` is `bulk` or `single`.
    #[inline]
    pub fn record_ingest(&self, kind: &str, count: usize) {
        if let Some(ref counter) = self.ingested_total {
            counter.with_label_values(&[kind]).inc_by(count as u64);
        }
    }

    #[inline]
    pub fn record_rejected(&self, kind: &str) {
        if let Some(ref counter) = self.rejected_total {
            counter.with_label_values(&[kind]).inc();
        }
    }

    #[inline]
    pub fn record_query(&self) {
        if let Some(ref counter) = self.queries_total {
            counter.inc();
        }
    }

    #[inline]
    pub fn record_clear(&self) {
        if let Some(ref counter) = self.clears_total {
            counter.inc();
        }
    }

    #[inline]
    pub fn set_store_size(&self, size: usize) {
        if let Some(ref gauge) = self.store_size {
            gauge.set(size as i64);
        }
    }

    /// Render prometheus text exposition format.
    pub fn render(&self) -> String {
        match self.registry {
            Some(ref registry) => render_metrics(registry),
            None => String::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
