//! Metrics snapshot endpoint.
//! Used by: server.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;
use crate::telemetry::MetricsSnapshot;

#[derive(Serialize)]
pub struct MetricsReport {
    #[serde(flatten)]
    pub counters: MetricsSnapshot,
    pub limiters: usize,
    pub tracked_records: usize,
}

pub async fn metrics(State(state): State<AppState>) -> Json<MetricsReport> {
    let tracked_records = state.registry.limiters().map(|l| l.tracked()).sum();
    Json(MetricsReport {
        counters: state.metrics.snapshot(),
        limiters: state.registry.len(),
        tracked_records,
    })
}
