//! Metrics collection for ModelServer
//!
//! Prometheus metrics for the predict path. Updated by the request dispatcher;
//! `gather` renders them in the text exposition format.

use lazy_static::lazy_static;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use std::sync::Arc;

/// Metrics registry for ModelServer
#[derive(Debug, Clone)]
pub struct MetricsRegistry {
    pub registry: Arc<Registry>,
    pub predict: PredictMetrics,
}

/// Predict call metrics
#[derive(Debug, Clone)]
pub struct PredictMetrics {
    /// Total number of predict calls
    pub requests_total: IntCounter,

    /// Failed predict calls, by status code
    pub failures_total: IntCounterVec,

    /// Calls currently inside the execution engine
    pub in_flight: IntGauge,

    /// End to end predict duration
    pub duration: Histogram,
}

lazy_static! {
    /// Global metrics registry instance
    pub static ref METRICS: MetricsRegistry = MetricsRegistry::new();
}

impl MetricsRegistry {
    /// Create a new metrics registry
    pub fn new() -> Self {
        let registry = Arc::new(Registry::new());

        let requests_total = IntCounter::new(
            "predict_requests_total",
            "Total number of predict requests",
        )
        .expect("valid metric definition");

        let failures_total = IntCounterVec::new(
            Opts::new("predict_failures_total", "Failed predict requests by status code"),
            &["code"],
        )
        .expect("valid metric definition");

        let in_flight = IntGauge::new(
            "predict_in_flight",
            "Predict requests currently executing",
        )
        .expect("valid metric definition");

        let duration = Histogram::with_opts(
            HistogramOpts::new("predict_duration_seconds", "Predict request duration in seconds")
                .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        )
        .expect("valid metric definition");

        registry
            .register(Box::new(requests_total.clone()))
            .expect("metric registered once");
        registry
            .register(Box::new(failures_total.clone()))
            .expect("metric registered once");
        registry
            .register(Box::new(in_flight.clone()))
            .expect("metric registered once");
        registry
            .register(Box::new(duration.clone()))
            .expect("metric registered once");

        MetricsRegistry {
            registry,
            predict: PredictMetrics {
                requests_total,
                failures_total,
                in_flight,
                duration,
            },
        }
    }

    /// Gather all metrics as text
    pub fn gather(&self) -> String {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if encoder.encode(&metric_families, &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}
