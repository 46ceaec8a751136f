use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramTimer, HistogramVec, IntCounterVec,
    TextEncoder,
};

// Prometheus metrics (default registry)
pub static REMOTE_CALLS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "moviecards_remote_calls_total",
        "Calls made to moviecards-service by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("register remote_calls_total")
});

pub static FALLBACKS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "moviecards_fallbacks_total",
        "Failed remote calls answered with a placeholder value",
        &["operation"]
    )
    .expect("register fallbacks_total")
});

pub static REMOTE_CALL_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "moviecards_remote_call_duration_seconds",
        "Remote call duration in seconds",
        &["operation"],
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("register remote_call_duration")
});

#[derive(Debug, Clone, Copy)]
pub enum Outcome {
    Ok,
    Error,
}

impl Outcome {
    fn as_str(self) -> &'static str {
        match self {
            Outcome::Ok => "ok",
            Outcome::Error => "error",
        }
    }
}

pub fn record_call(operation: &str, outcome: Outcome) {
    REMOTE_CALLS_TOTAL.with_label_values(&[operation, outcome.as_str()]).inc();
}

pub fn record_fallback(operation: &str) {
    FALLBACKS_TOTAL.with_label_values(&[operation]).inc();
}

/// Observes the elapsed time when dropped.
pub fn start_timer(operation: &str) -> HistogramTimer {
    REMOTE_CALL_DURATION.with_label_values(&[operation]).start_timer()
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
    fn counters_show_up_in_exposition() {
        record_call("observability_probe", Outcome::Ok);
        record_fallback("observability_probe");
        let (status, body) = encode_metrics();
        assert_eq!(status, axum::http::StatusCode::OK);
        assert!(body.contains("moviecards_remote_calls_total"));
        assert!(body.contains("operation=\"observability_probe\""));
    }
}
