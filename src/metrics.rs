// src/metrics.rs
use anyhow::Context;
use axum::{routing::get, Router};
use metrics::{describe_counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder and expose the live cache TTL as a gauge.
    pub fn init(live_cache_ttl_secs: u64) -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;

        crate::collect::ensure_metrics_described();
        describe_counter!("live_cache_hits_total", "Live ranking requests served from cache.");
        describe_counter!("live_cache_misses_total", "Live ranking requests that hit the provider.");
        describe_counter!("store_writes_total", "Snapshots written.");
        describe_counter!("store_errors_total", "Snapshot reads/writes that failed.");
        gauge!("live_cache_ttl_secs").set(live_cache_ttl_secs as f64);

        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
