//! Shared application state.

use std::sync::Arc;

use tokio::sync::watch;

use crate::config::Rules;
use crate::registry::Registry;
use crate::sweeper;
use crate::telemetry::Metrics;

pub struct AppStateInner {
    pub registry: Registry,
    pub metrics: Metrics,
}

pub type AppState = Arc<AppStateInner>;

/// Builds the middleware state from the rule set and starts the background
/// reclaimer. `shutdown` is the only signal that stops the reclaimer; the
/// registry itself lives for the process lifetime.
pub fn build_state(rules: &Rules, shutdown: watch::Receiver<bool>) -> AppState {
    let state = Arc::new(AppStateInner {
        registry: Registry::from_rules(rules),
        metrics: Metrics::new(),
    });
    sweeper::spawn(state.clone(), sweeper::DEFAULT_SWEEP_INTERVAL, shutdown);
    state
}

/// State without a running reclaimer; tests drive sweeps themselves.
pub fn build_test_state(rules: &Rules) -> AppState {
    Arc::new(AppStateInner {
        registry: Registry::from_rules(rules),
        metrics: Metrics::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LimitRule;
    use std::time::Duration;

    #[tokio::test]
    async fn build_state_wires_registry_and_metrics() {
        let rules = Rules::new(vec![LimitRule::endpoint(5, Duration::from_secs(10), &["/"])]);
        let (_tx, rx) = watch::channel(false);
        let state = build_state(&rules, rx);

        assert_eq!(state.registry.len(), 1);
        assert_eq!(state.metrics.snapshot().requests_allowed, 0);
    }
}
