//! Prometheus metrics for request counting and latency tracking.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::debug;

// === Metric Name Constants ===

/// Predictions served counter metric name.
pub const METRIC_PREDICTIONS_SERVED: &str = "predictions_served_total";
/// Health checks counter metric name.
pub const METRIC_HEALTH_CHECKS: &str = "health_checks_total";
/// Prediction handler latency metric name.
pub const METRIC_PREDICT_LATENCY: &str = "predict_latency_ms";

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder and register metric descriptions.
/// Call this once at startup.
pub fn init_metrics() -> crate::Result<()> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| crate::ServerError::Metrics(e.to_string()))?;
    PROMETHEUS_HANDLE.set(handle).ok();

    describe_counter!(
        METRIC_PREDICTIONS_SERVED,
        "Total number of predictions served"
    );
    describe_counter!(
        METRIC_HEALTH_CHECKS,
        "Total number of health checks handled"
    );
    describe_histogram!(
        METRIC_PREDICT_LATENCY,
        "Prediction handler latency in milliseconds"
    );

    debug!("Metrics initialized");
    Ok(())
}

/// Render current metrics in the Prometheus text format.
/// Renders an empty document if the recorder was never installed.
pub fn render() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

/// Increment predictions served counter.
pub fn inc_predictions_served() {
    counter!(METRIC_PREDICTIONS_SERVED).increment(1);
}

/// Increment health checks counter.
pub fn inc_health_checks() {
    counter!(METRIC_HEALTH_CHECKS).increment(1);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        histogram!(self.metric_name).record(latency_ms);
    }
}

/// Create a latency timer for the prediction handler.
pub fn timer_predict() -> LatencyTimer {
    LatencyTimer::new(METRIC_PREDICT_LATENCY)
}
