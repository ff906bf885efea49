use prometheus::{Encoder, TextEncoder};

/// Render prometheus text exposition format from a registry.
pub fn render_metrics(registry: &prometheus::Registry) -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::{IntCounter, Opts, Registry};

    #[test]
    fn render_empty_registry_returns_empty_string() {
        let registry = Registry::new();
        assert!(render_metrics(&registry).is_empty());
    }

    #[test]
    fn render_includes_type_and_value() {
        let registry = Registry::new();
        let counter = IntCounter::with_opts(Opts::new("entries_total", "Entries")).unwrap();
        registry.register(Box::new(counter.clone())).unwrap();
        counter.inc_by(3);

        let output = render_metrics(&registry);
        assert!(output.contains("# TYPE entries_total counter"));
        assert!(output.contains("entries_total 3"));
    }
}
