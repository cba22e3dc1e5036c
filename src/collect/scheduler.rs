// src/collect/scheduler.rs
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::collect::{run_cycle, CollectionPipeline};
use crate::store::TrendStore;

/// Spawn a background task running one collection cycle per `every`.
/// The first cycle starts immediately. Cycles never overlap.
pub fn spawn_collect_scheduler(
    pipeline: Arc<CollectionPipeline>,
    store: Arc<dyn TrendStore>,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match run_cycle(&pipeline, store.as_ref()).await {
                Ok(snap) => tracing::info!(
                    target: "collect",
                    combined = snap.combined.len(),
                    "scheduled collection tick"
                ),
                Err(e) => tracing::warn!(target: "collect", error = %e, "scheduled collection failed"),
            }
        }
    })
}
