//! Metrics tracking.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct Metrics {
    pub requests_allowed: AtomicU64,
    pub requests_denied: AtomicU64,
    pub requests_passed_through: AtomicU64,
    pub sweep_runs: AtomicU64,
    pub records_swept: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            requests_allowed: AtomicU64::new(0),
            requests_denied: AtomicU64::new(0),
            requests_passed_through: AtomicU64::new(0),
            sweep_runs: AtomicU64::new(0),
            records_swept: AtomicU64::new(0),
        }
    }

    pub fn record_allowed(&self) {
        self.requests_allowed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_denied(&self) {
        self.requests_denied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_pass_through(&self) {
        self.requests_passed_through.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sweep(&self, swept: usize) {
        self.sweep_runs.fetch_add(1, Ordering::Relaxed);
        self.records_swept.fetch_add(swept as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_allowed: self.requests_allowed.load(Ordering::Relaxed),
            requests_denied: self.requests_denied.load(Ordering::Relaxed),
            requests_passed_through: self.requests_passed_through.load(Ordering::Relaxed),
            sweep_runs: self.sweep_runs.load(Ordering::Relaxed),
            records_swept: self.records_swept.load(Ordering::Relaxed),
        }
    }
}

#[derive(Serialize)]
pub struct MetricsSnapshot {
    pub requests_allowed: u64,
    pub requests_denied: u64,
    pub requests_passed_through: u64,
    pub sweep_runs: u64,
    pub records_swept: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_metrics_start_at_zero() {
        let s = Metrics::new().snapshot();
        assert_eq!(s.requests_allowed, 0);
        assert_eq!(s.requests_denied, 0);
        assert_eq!(s.records_swept, 0);
    }

    #[test]
    fn record_denied_increments() {
        let m = Metrics::new();
        m.record_denied();
        assert_eq!(m.snapshot().requests_denied, 1);
    }

    #[test]
    fn record_sweep_counts_runs_and_records() {
        let m = Metrics::new();
        m.record_sweep(3);
        m.record_sweep(0);
        let s = m.snapshot();
        assert_eq!(s.sweep_runs, 2);
        assert_eq!(s.records_swept, 3);
    }
}
