//! Prometheus-backed metrics registry and snapshot helpers.
//!
//! # Design
//! - Encapsulates collector registration to keep the public API small.
//! - Exposes only the counters/gauges the comparison service reports.

use std::sync::Arc;

use anyhow::{Context, Result};
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use serde::Serialize;

/// Prometheus-backed metrics registry shared across services.
#[derive(Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    registry: Registry,
    http_requests_total: IntCounterVec,
    compare_deltas_total: IntCounterVec,
    compare_clears_total: IntCounter,
    compare_sessions: IntGauge,
}

/// Snapshot of the comparison counters for health reporting.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    /// Delta requests applied with the `add` action.
    pub deltas_added: u64,
    /// Delta requests applied with the `remove` action.
    pub deltas_removed: u64,
    /// Session sets cleared.
    pub clears: u64,
    /// Sessions currently holding a set.
    pub sessions: i64,
}

impl Metrics {
    /// Construct a new metrics registry with the standard collectors registered.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the Prometheus collectors cannot be
    /// registered.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests received"),
            &["route", "code"],
        )?;
        let compare_deltas_total = IntCounterVec::new(
            Opts::new(
                "compare_deltas_total",
                "Comparison set deltas applied by action",
            ),
            &["action"],
        )?;
        let compare_clears_total = IntCounter::with_opts(Opts::new(
            "compare_clears_total",
            "Comparison sets cleared",
        ))?;
        let compare_sessions = IntGauge::with_opts(Opts::new(
            "compare_sessions",
            "Sessions holding a comparison set",
        ))?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(compare_deltas_total.clone()))?;
        registry.register(Box::new(compare_clears_total.clone()))?;
        registry.register(Box::new(compare_sessions.clone()))?;

        Ok(Self {
            inner: Arc::new(MetricsInner {
                registry,
                http_requests_total,
                compare_deltas_total,
                compare_clears_total,
                compare_sessions,
            }),
        })
    }

    /// Increment the HTTP request counter for the given route and status code.
    pub fn inc_http_request(&self, route: &str, status: u16) {
        self.inner
            .http_requests_total
            .with_label_values(&[route, &status.to_string()])
            .inc();
    }

    /// Requests counted so far for the route template and status code.
    #[must_use]
    pub fn http_requests(&self, route: &str, status: u16) -> u64 {
        self.inner
            .http_requests_total
            .with_label_values(&[route, &status.to_string()])
            .get()
    }

    /// Count one applied delta for the action name (`add`/`remove`).
    pub fn inc_compare_delta(&self, action: &str) {
        self.inner
            .compare_deltas_total
            .with_label_values(&[action])
            .inc();
    }

    /// Count one cleared session set.
    pub fn inc_compare_clear(&self) {
        self.inner.compare_clears_total.inc();
    }

    /// Set the number of sessions holding a set.
    pub fn set_compare_sessions(&self, count: i64) {
        self.inner.compare_sessions.set(count);
    }

    /// Render the metrics registry using the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if the metrics cannot be encoded or if the encoded
    /// buffer is not valid UTF-8.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .context("failed to encode Prometheus metrics")?;
        String::from_utf8(buffer).context("metrics output was not valid UTF-8")
    }

    /// Take a point-in-time snapshot of the comparison counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        let deltas = &self.inner.compare_deltas_total;
        MetricsSnapshot {
            deltas_added: deltas.with_label_values(&["add"]).get(),
            deltas_removed: deltas.with_label_values(&["remove"]).get(),
            clears: self.inner.compare_clears_total.get(),
            sessions: self.inner.compare_sessions.get(),
        }
    }
}
