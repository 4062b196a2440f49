//! Fixed-window counter state for one rate limit rule.
//! Used by: registry, admission, sweeper.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Per-client counter for the current window.
///
/// `window_start` is written at creation and on window reset only; increments
/// leave it alone, so the window runs from the first request it admitted.
pub struct ClientRecord {
    pub count: u32,
    pub window_start: Instant,
    pub key: String,
}

/// One rule's enforcement unit: a limit, a window, and the per-client records
/// it tracks. Each limiter owns its mutex, so limiters for different routing
/// keys never contend with each other.
pub struct Limiter {
    limit: u32,
    window: Duration,
    records: Mutex<HashMap<String, ClientRecord>>,
}

impl Limiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Fixed-window admission: one read-modify-write under this limiter's
    /// mutex. An expired window resets lazily, on the observation that finds
    /// it expired. Denies without incrementing once the budget is spent.
    pub fn admit(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut records = self.records.lock().unwrap();

        let record = records.entry(key.to_owned()).or_insert_with(|| ClientRecord {
            count: 0,
            window_start: now,
            key: key.to_owned(),
        });

        if now.duration_since(record.window_start) > self.window {
            record.count = 0;
            record.window_start = now;
        }

        if record.count >= self.limit {
            tracing::debug!(key = %record.key, count = record.count, limit = self.limit, "over limit");
            return false;
        }
        record.count += 1;
        true
    }

    /// Drop records whose window had already expired at `now`. Returns the
    /// number of records removed.
    pub fn sweep(&self, now: Instant) -> usize {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        let window = self.window;
        records.retain(|_, record| now.duration_since(record.window_start) <= window);
        before - records.len()
    }

    /// Number of clients currently tracked.
    pub fn tracked(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    #[cfg(test)]
    fn count_for(&self, key: &str) -> Option<u32> {
        self.records.lock().unwrap().get(key).map(|r| r.count)
    }
}
