// tests/metrics.rs
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use keyword_trends::cache::MemoryCache;
use keyword_trends::collect::rate_limit::RequestPacer;
use keyword_trends::collect::types::TextFeed;
use keyword_trends::collect::{CollectionPipeline, Collector};
use keyword_trends::live::LiveTrends;
use keyword_trends::metrics::Metrics;
use keyword_trends::store::SqliteStore;
use keyword_trends::types::{RankedKeyword, Source};
use keyword_trends::{router, AppState};

struct Broken;

#[async_trait]
impl TextFeed for Broken {
    async fn fetch_texts(&self) -> anyhow::Result<Vec<String>> {
        anyhow::bail!("upstream 503")
    }
    fn name(&self) -> &'static str {
        "broken"
    }
}

struct Fixed;

#[async_trait]
impl TextFeed for Fixed {
    async fn fetch_texts(&self) -> anyhow::Result<Vec<String>> {
        Ok(vec!["반도체 수출 회복".to_string()])
    }
    fn name(&self) -> &'static str {
        "fixed"
    }
}

// Full in-process app with /metrics merged, as the binary builds it.
async fn build_app() -> Router {
    let store = SqliteStore::in_memory().await.expect("in-memory store");
    let pipeline = CollectionPipeline::new(
        vec![
            Collector::new(Source::News, vec![Box::new(Fixed)], 10),
            Collector::new(Source::Social, vec![Box::new(Broken)], 10),
        ],
        Collector::new(Source::News, vec![Box::new(Broken)], 20),
        RequestPacer::unpaced(),
        20,
    );
    let cache = Arc::new(MemoryCache::<Vec<RankedKeyword>>::new());
    let live = LiveTrends::new(cache, Duration::from_secs(300));
    let state = AppState::new(Arc::new(store), Arc::new(pipeline), Arc::new(live));

    let metrics = Metrics::init(300).expect("install recorder once per test binary");
    router(state).merge(metrics.router())
}

#[tokio::test]
async fn collection_cycle_shows_up_on_metrics() {
    let app = build_app().await;

    let r = app
        .clone()
        .oneshot(Request::post("/hybrid-trends").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(r.status(), StatusCode::OK);

    let m = app
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(m.status(), StatusCode::OK);
    // axum::body::to_bytes requires an explicit limit
    let body = body::to_bytes(m.into_body(), 1_048_576).await.unwrap(); // 1 MiB
    let text = String::from_utf8(body.to_vec()).unwrap();

    for needle in [
        "collect_runs_total",
        "collect_provider_errors_total",
        "collect_keywords_total",
        "collect_last_run_ts",
        "store_writes_total",
        "live_cache_ttl_secs",
    ] {
        assert!(
            text.contains(needle),
            "metrics exposition missing '{needle}'\n{text}"
        );
    }
    assert!(text.contains(r#"provider="broken""#), "provider label\n{text}");
}
