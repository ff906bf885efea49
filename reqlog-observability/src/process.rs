/// Resident set size of this process in bytes.
///
/// Read through the prometheus process collector, which only exists on
/// Linux. Other platforms, and builds without the `prometheus` feature,
/// get `None`.
#[cfg(all(feature = "prometheus", target_os = "linux"))]
pub fn resident_memory_bytes() -> Option<u64> {
    use prometheus::core::Collector;
    use prometheus::process_collector::ProcessCollector;

    const RESIDENT_MEMORY: &str = "process_resident_memory_bytes";

    let collector = ProcessCollector::for_self();
    collector
        .collect()
        .iter()
        .find(|family| family.get_name() == RESIDENT_MEMORY)
        .and_then(|family| family.get_metric().first())
        .map(|metric| metric.get_gauge().get_value() as u64)
        .filter(|bytes| *bytes > 0)
}

#[cfg(not(all(feature = "prometheus", target_os = "linux")))]
pub fn resident_memory_bytes() -> Option<u64> {
    None
}

/// `13_107_200` → `"12.50 MB"`.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}
