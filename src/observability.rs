//! In-process counters for resolutions and background expansions

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics handle for recording counters
#[derive(Debug, Default)]
pub struct Metrics {
    resolutions: AtomicU64,
    unshorten_started: AtomicU64,
    unshorten_superseded: AtomicU64,
    unshorten_expanded: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolution(&self) {
        self.resolutions.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "resolutions", "Metric incremented");
    }

    pub fn unshorten_started(&self) {
        self.unshorten_started.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "unshorten_started", "Metric incremented");
    }

    pub fn unshorten_superseded(&self) {
        self.unshorten_superseded.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "unshorten_superseded", "Metric incremented");
    }

    pub fn unshorten_expanded(&self) {
        self.unshorten_expanded.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "unshorten_expanded", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            resolutions: self.resolutions.load(Ordering::Relaxed),
            unshorten_started: self.unshorten_started.load(Ordering::Relaxed),
            unshorten_superseded: self.unshorten_superseded.load(Ordering::Relaxed),
            unshorten_expanded: self.unshorten_expanded.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub resolutions: u64,
    pub unshorten_started: u64,
    pub unshorten_superseded: u64,
    pub unshorten_expanded: u64,
}
