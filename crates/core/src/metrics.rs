//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Widget injection (outcomes, skip reasons)
//! - Catalog service requests

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

/// Injection runs by terminal outcome.
pub static INJECTION_OUTCOMES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "streamguide_injection_outcomes_total",
            "Total widget injection runs by outcome",
        ),
        &["outcome"], // "skipped", "rendered", "failed"
    )
    .unwrap()
});

/// Skipped injection runs by reason.
pub static SKIP_REASONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "streamguide_skip_reasons_total",
            "Total skipped injection runs by reason",
        ),
        &["reason"],
    )
    .unwrap()
});

/// Catalog requests by operation and result.
pub static CATALOG_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "streamguide_catalog_requests_total",
            "Total catalog service requests",
        ),
        &["operation", "result"],
    )
    .unwrap()
});

/// Catalog request duration in seconds.
pub static CATALOG_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "streamguide_catalog_request_duration_seconds",
            "Duration of catalog service requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["operation"],
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(INJECTION_OUTCOMES.clone()),
        Box::new(SKIP_REASONS.clone()),
        Box::new(CATALOG_REQUESTS.clone()),
        Box::new(CATALOG_REQUEST_DURATION.clone()),
    ]
}
