//! Background reclaimer for stale client records.
//! Used by: state.

use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::state::AppState;

/// Original cleanup cadence: every two minutes.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(120);

/// Walks every limiter on a fixed cadence and drops records whose window has
/// expired. Locks are per limiter, so a pass never stalls the request path
/// for longer than one limiter's map. The task stops once `shutdown`
/// signals (or its sender drops); a pass already underway finishes first.
pub fn spawn(
    state: AppState,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; nothing to sweep yet.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    tracing::debug!("reclaimer stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let swept = sweep_all(&state);
                    state.metrics.record_sweep(swept);
                    if swept > 0 {
                        tracing::info!(swept, "dropped stale client records");
                    }
                }
            }
        }
    })
}

fn sweep_all(state: &AppState) -> usize {
    let now = Instant::now();
    state
        .registry
        .limiters()
        .map(|limiter| limiter.sweep(now))
        .sum()
}
