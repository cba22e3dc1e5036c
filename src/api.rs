// src/api.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::cache::MemoryCache;
use crate::collect::providers::build_http_client;
use crate::collect::types::MissingCredential;
use crate::collect::{run_cycle, single_source_snapshot, CollectionPipeline, HYBRID_ENGINE, REALTIME_PERIOD};
use crate::config::AppConfig;
use crate::error::{ApiError, MSG_COLLECT_FAILED, MSG_DUMMY_FAILED, MSG_NO_DATA};
use crate::fixtures::dummy_snapshot;
use crate::live::google::GoogleDailyTrends;
use crate::live::naver::NaverDatalab;
use crate::live::LiveTrends;
use crate::store::{SqliteStore, TrendStore};
use crate::types::{RankedKeyword, Source};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TrendStore>,
    pub pipeline: Arc<CollectionPipeline>,
    pub live: Arc<LiveTrends>,
}

impl AppState {
    pub fn new(store: Arc<dyn TrendStore>, pipeline: Arc<CollectionPipeline>, live: Arc<LiveTrends>) -> Self {
        Self { store, pipeline, live }
    }

    /// Production wiring: SQLite store, real feeds, Google + Naver live rankings.
    pub async fn from_config(cfg: &AppConfig) -> anyhow::Result<Self> {
        let store = SqliteStore::connect(&cfg.database_url).await?;
        let pipeline = CollectionPipeline::from_config(cfg)?;

        let http = build_http_client(cfg.settings.http_timeout())?;
        let cache = Arc::new(MemoryCache::<Vec<RankedKeyword>>::new());
        let live = LiveTrends::new(cache, cfg.settings.live_cache_ttl())
            .with_provider(Arc::new(GoogleDailyTrends::new(http.clone())))
            .with_provider(Arc::new(NaverDatalab::new(http, cfg.credentials.naver())));

        Ok(Self::new(Arc::new(store), Arc::new(pipeline), Arc::new(live)))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/trends", get(get_trends))
        .route("/trends/{engine}", get(get_live_trends))
        .route("/collect-news", post(collect_news))
        .route("/hybrid-trends", get(hybrid_usage).post(collect_hybrid))
        .route("/test-dummy", get(dummy_usage).post(write_dummy))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
struct TrendQuery {
    #[serde(default)]
    engine: Option<String>,
    #[serde(default)]
    period: Option<String>,
}

fn or_default(v: Option<String>, default: &str) -> String {
    v.filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

async fn get_trends(State(state): State<AppState>, Query(q): Query<TrendQuery>) -> Result<Response, ApiError> {
    let engine = or_default(q.engine, HYBRID_ENGINE);
    let period = or_default(q.period, REALTIME_PERIOD);

    let row = state
        .store
        .latest(&engine, &period)
        .await
        .map_err(ApiError::Query)?;

    Ok(match row {
        Some(row) => Json(row).into_response(),
        None => Json(json!({
            "engine": engine,
            "period": period,
            "data": { "keywords": [] },
            "message": MSG_NO_DATA,
        }))
        .into_response(),
    })
}

async fn collect_news(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let keywords = state
        .pipeline
        .collect_headlines()
        .await
        .ok_or(ApiError::FeedEmpty)?;

    let top_k = keywords.len();
    let snapshot = single_source_snapshot(Source::News, keywords, REALTIME_PERIOD, Utc::now(), top_k);
    state
        .store
        .save(Source::News.as_str(), REALTIME_PERIOD, &snapshot)
        .await?;

    tracing::info!(target: "api", keywords = snapshot.combined.len(), "headline keywords stored");
    let keywords = snapshot.sources.get(&Source::News).cloned().unwrap_or_default();
    Ok(Json(json!({ "success": true, "keywords": keywords })))
}

async fn collect_hybrid(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let snapshot = run_cycle(&state.pipeline, state.store.as_ref())
        .await
        .map_err(|source| ApiError::Operation {
            message: MSG_COLLECT_FAILED,
            source,
        })?;

    Ok(Json(json!({
        "success": true,
        "message": "하이브리드 트렌드 데이터 수집 완료",
        "data": snapshot,
    })))
}

async fn hybrid_usage() -> Json<serde_json::Value> {
    Json(json!({
        "message": "하이브리드 트렌드 데이터 수집 API입니다.",
        "usage": "POST /hybrid-trends 로 뉴스, 소셜, 쇼핑, 검색 키워드를 수집합니다.",
    }))
}

async fn write_dummy(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let snapshot = dummy_snapshot(Utc::now());
    state
        .store
        .save(HYBRID_ENGINE, REALTIME_PERIOD, &snapshot)
        .await
        .map_err(|source| ApiError::Operation {
            message: MSG_DUMMY_FAILED,
            source,
        })?;

    Ok(Json(json!({
        "success": true,
        "message": "더미 하이브리드 트렌드 데이터가 생성되었습니다.",
        "data": snapshot,
    })))
}

async fn dummy_usage() -> Json<serde_json::Value> {
    Json(json!({
        "message": "더미 트렌드 데이터 생성 API입니다.",
        "usage": "POST /test-dummy 로 테스트용 하이브리드 데이터를 저장합니다.",
    }))
}

#[derive(Debug, Default, Deserialize)]
struct LiveQuery {
    #[serde(default)]
    period: Option<String>,
}

async fn get_live_trends(
    State(state): State<AppState>,
    Path(engine): Path<String>,
    Query(q): Query<LiveQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let period = or_default(q.period, REALTIME_PERIOD);

    let result = match state.live.ranking(&engine, &period).await {
        None => return Err(ApiError::UnknownEngine(engine)),
        Some(Ok(r)) => r,
        Some(Err(e)) => {
            return Err(match e.downcast_ref::<MissingCredential>() {
                Some(missing) => ApiError::Config(missing.to_string()),
                None => ApiError::Upstream(format!("{e:#}")),
            })
        }
    };

    Ok(Json(json!({
        "engine": engine,
        "period": period,
        "cached": result.cached,
        "keywords": result.keywords,
    })))
}
