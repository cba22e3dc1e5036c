//! Keyword Trends Service: binary entrypoint
//! Boots the Axum HTTP server: config, store, collectors, live rankings,
//! the optional collection scheduler and `/metrics`.

use std::sync::Arc;

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use keyword_trends::collect::scheduler::spawn_collect_scheduler;
use keyword_trends::config::AppConfig;
use keyword_trends::metrics::Metrics;
use keyword_trends::{router, AppState};

/// Compact logs by default, JSON lines with `LOG_FORMAT=json`.
/// Ignored if the runtime already installed a subscriber.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("keyword_trends=info,warn"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let res = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .try_init()
    };
    if res.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = AppConfig::from_env()?;
    let state = AppState::from_config(&cfg).await?;
    let metrics = Metrics::init(cfg.settings.live_cache_ttl_secs)?;

    if let Some(every) = cfg.settings.schedule_interval() {
        tracing::info!(every_secs = every.as_secs(), "collection scheduler enabled");
        spawn_collect_scheduler(Arc::clone(&state.pipeline), Arc::clone(&state.store), every);
    }

    let router = router(state).merge(metrics.router());
    tracing::info!(database = %cfg.database_url, "keyword trends service ready");

    Ok(router.into())
}
