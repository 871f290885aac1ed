// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Client metrics
//!
//! Counts fetches by outcome and keeps recent latencies for percentiles.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Client metrics collector
#[derive(Debug, Default)]
pub struct ClientMetrics {
    /// Completed fetches
    fetches: AtomicU64,
    /// Fetches that resolved
    succeeded: AtomicU64,
    /// Fetches that rejected
    failed: AtomicU64,
    /// Fetches vetoed by a request interceptor
    cancelled: AtomicU64,
    /// Fetches answered by a mock handler
    mocked: AtomicU64,
    /// Total fetch time (milliseconds)
    total_latency_ms: AtomicU64,
    /// Start time for uptime calculation
    start_time: RwLock<Option<Instant>>,
    /// Fetch latencies for percentile calculation
    latencies: RwLock<Vec<u64>>,
}

/// Metrics report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Uptime in seconds
    pub uptime_secs: u64,
    pub fetches: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub cancelled: u64,
    pub mocked: u64,
    /// Average fetch time (ms)
    pub avg_latency_ms: f64,
    /// Fetch latency percentiles
    pub latency_p50_ms: u64,
    pub latency_p95_ms: u64,
    pub latency_p99_ms: u64,
    /// Fetches per second
    pub fetches_per_second: f64,
}

impl ClientMetrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        let metrics = Self::default();
        *metrics.start_time.write() = Some(Instant::now());
        metrics
    }

    /// Record a completed fetch
    pub fn record_fetch(&self, latency_ms: u64, success: bool) {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        self.total_latency_ms.fetch_add(latency_ms, Ordering::Relaxed);
        if success {
            self.succeeded.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }

        let mut latencies = self.latencies.write();
        latencies.push(latency_ms);

        // Keep only last 10000 latencies
        if latencies.len() > 10000 {
            latencies.drain(0..5000);
        }
    }

    /// Record a request interceptor veto
    pub fn record_cancelled(&self) {
        self.cancelled.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a mocked answer
    pub fn record_mocked(&self) {
        self.mocked.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current report
    pub fn report(&self) -> MetricsReport {
        let fetches = self.fetches.load(Ordering::Relaxed);
        let total_ms = self.total_latency_ms.load(Ordering::Relaxed);

        let uptime_secs = self
            .start_time
            .read()
            .map(|t| t.elapsed().as_secs())
            .unwrap_or(0);

        let latencies = self.latencies.read();
        let (p50, p95, p99) = calculate_percentiles(&latencies);

        let avg_latency_ms = if fetches > 0 {
            total_ms as f64 / fetches as f64
        } else {
            0.0
        };

        MetricsReport {
            uptime_secs,
            fetches,
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            cancelled: self.cancelled.load(Ordering::Relaxed),
            mocked: self.mocked.load(Ordering::Relaxed),
            avg_latency_ms,
            latency_p50_ms: p50,
            latency_p95_ms: p95,
            latency_p99_ms: p99,
            fetches_per_second: fetches as f64 / uptime_secs.max(1) as f64,
        }
    }

    /// Reset all metrics
    pub fn reset(&self) {
        self.fetches.store(0, Ordering::Relaxed);
        self.succeeded.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
        self.cancelled.store(0, Ordering::Relaxed);
        self.mocked.store(0, Ordering::Relaxed);
        self.total_latency_ms.store(0, Ordering::Relaxed);
        *self.start_time.write() = Some(Instant::now());
        self.latencies.write().clear();
    }
}

/// Calculate percentiles from latencies
fn calculate_percentiles(latencies: &[u64]) -> (u64, u64, u64) {
    if latencies.is_empty() {
        return (0, 0, 0);
    }

    let mut sorted: Vec<u64> = latencies.to_vec();
    sorted.sort_unstable();

    let len = sorted.len();
    let p50 = sorted[len / 2];
    let p95 = sorted[((len as f64 * 0.95) as usize).min(len - 1)];
    let p99 = sorted[((len as f64 * 0.99) as usize).min(len - 1)];

    (p50, p95, p99)
}
