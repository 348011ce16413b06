use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, register_int_gauge, Encoder, IntCounterVec, IntGauge, TextEncoder};

// Prometheus metrics (default registry)
pub static LOOKUPS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "locations_lookups_total",
        "Beer lookups by outcome",
        &["outcome"]
    )
    .expect("register lookups_total")
});

pub static RELOADS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "locations_catalog_reloads_total",
        "Catalog reloads by outcome",
        &["outcome"]
    )
    .expect("register catalog_reloads_total")
});

pub static CATALOG_LOCATIONS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "locations_catalog_locations",
        "Locations in the published catalog snapshot"
    )
    .expect("register catalog_locations")
});

pub fn record_lookup(outcome: &str) {
    LOOKUPS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn record_reload(outcome: &str) {
    RELOADS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn set_catalog_size(locations: usize) {
    CATALOG_LOCATIONS.set(i64::try_from(locations).unwrap_or(i64::MAX));
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposition_contains_recorded_series() {
        record_lookup("hit");
        set_catalog_size(3);
        let (status, body) = encode_metrics();
        assert_eq!(status, axum::http::StatusCode::OK);
        assert!(body.contains("locations_lookups_total{outcome=\"hit\"}"), "{body}");
        assert!(body.contains("locations_catalog_locations"), "{body}");
    }
}
