// src/collect/mod.rs
pub mod providers;
pub mod rate_limit;
pub mod scheduler;
pub mod types;

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::{DateTime, Utc};
use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;

use crate::collect::providers::{
    build_http_client, google_news_rss::GoogleNewsRss, naver_autocomplete::NaverAutocomplete,
    naver_news::NaverNewsScraper, naver_shopping::NaverShopping, news_api::NewsApiHeadlines,
    youtube::YoutubePopular,
};
use crate::collect::rate_limit::RequestPacer;
use crate::collect::types::TextFeed;
use crate::config::AppConfig;
use crate::keywords::{aggregate, extract_all, score_tokens, score_tokens_with_weight};
use crate::source_weights;
use crate::store::{StoreResult, TrendStore};
use crate::types::{KeywordScore, Source, TrendSnapshot};

pub const HYBRID_ENGINE: &str = "hybrid";
pub const REALTIME_PERIOD: &str = "realtime";
/// Source identifier the headline job is weighted as.
pub const HEADLINE_FEED: &str = "google_rss";

/// One-time metrics registration (so series show up on /metrics).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("collect_runs_total", "Completed collection cycles.");
        describe_counter!(
            "collect_provider_errors_total",
            "Upstream fetch/parse failures, downgraded to empty contributions."
        );
        describe_counter!(
            "collect_keywords_total",
            "Keywords produced per source list."
        );
        describe_gauge!("collect_last_run_ts", "Unix ts of the last collection cycle.");
    });
}

/// Decode entities, strip tags, collapse whitespace.
pub fn normalize_text(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").expect("static regex"));
    out = re_tags.replace_all(&out, "").to_string();

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collector job for one source: every feed is fetched in turn, failures are
/// logged and contribute nothing, the pooled text is scored once.
pub struct Collector {
    source: Source,
    feeds: Vec<Box<dyn TextFeed>>,
    top_k: usize,
}

impl Collector {
    pub fn new(source: Source, feeds: Vec<Box<dyn TextFeed>>, top_k: usize) -> Self {
        Self { source, feeds, top_k }
    }

    pub fn source(&self) -> Source {
        self.source
    }

    /// Raw texts from all feeds; a failing feed yields nothing.
    pub async fn gather_texts(&self) -> Vec<String> {
        let mut texts = Vec::new();
        for feed in &self.feeds {
            match feed.fetch_texts().await {
                Ok(mut v) => {
                    tracing::debug!(provider = feed.name(), texts = v.len(), "feed fetched");
                    texts.append(&mut v);
                }
                Err(e) => {
                    tracing::warn!(error = ?e, provider = feed.name(), source = %self.source, "provider error");
                    counter!("collect_provider_errors_total", "provider" => feed.name()).increment(1);
                }
            }
        }
        texts
    }

    pub async fn collect(&self) -> Vec<KeywordScore> {
        let texts = self.gather_texts().await;
        let tokens = extract_all(&texts);
        let out = score_tokens(&tokens, self.source, self.top_k);
        counter!("collect_keywords_total", "source" => self.source.as_str()).increment(out.len() as u64);
        out
    }
}

/// The four source collectors plus the standalone Google News headline job.
pub struct CollectionPipeline {
    collectors: Vec<Collector>,
    headline: Collector,
    pacer: RequestPacer,
    combined_top_k: usize,
}

impl CollectionPipeline {
    pub fn new(
        collectors: Vec<Collector>,
        headline: Collector,
        pacer: RequestPacer,
        combined_top_k: usize,
    ) -> Self {
        Self {
            collectors,
            headline,
            pacer,
            combined_top_k,
        }
    }

    /// Wire the production feeds from config.
    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        let s = &cfg.settings;
        let creds = &cfg.credentials;
        let http = build_http_client(s.http_timeout())?;

        let news = Collector::new(
            Source::News,
            vec![
                Box::new(NewsApiHeadlines::new(http.clone(), creds.news_api_key.clone())),
                Box::new(NaverNewsScraper::new(http.clone())),
            ],
            s.source_top_k,
        );
        let social = Collector::new(
            Source::Social,
            vec![Box::new(YoutubePopular::new(http.clone(), creds.youtube_api_key.clone()))],
            s.source_top_k,
        );
        let shopping = Collector::new(
            Source::Shopping,
            vec![Box::new(NaverShopping::new(http.clone(), creds.naver()))],
            s.source_top_k,
        );
        let search = Collector::new(
            Source::Search,
            vec![Box::new(NaverAutocomplete::new(http.clone()))],
            s.source_top_k,
        );
        let headline = Collector::new(
            Source::News,
            vec![Box::new(GoogleNewsRss::new(http))],
            s.headline_top_k,
        );

        Ok(Self::new(
            vec![news, social, shopping, search],
            headline,
            RequestPacer::new(s.request_interval()),
            s.combined_top_k,
        ))
    }

    /// Run every collector in order, paced, and build the hybrid snapshot.
    pub async fn collect_hybrid(&self) -> TrendSnapshot {
        ensure_metrics_described();
        tracing::info!(target: "collect", collectors = self.collectors.len(), "hybrid collection started");

        let mut sources = BTreeMap::new();
        for c in &self.collectors {
            self.pacer.acquire().await;
            let list = c.collect().await;
            tracing::info!(target: "collect", source = %c.source(), keywords = list.len(), "source collected");
            sources.insert(c.source(), list);
        }

        let combined = aggregate(
            self.collectors
                .iter()
                .filter_map(|c| sources.get(&c.source()).map(Vec::as_slice)),
            self.combined_top_k,
        );

        let now = Utc::now();
        counter!("collect_runs_total").increment(1);
        gauge!("collect_last_run_ts").set(now.timestamp() as f64);
        tracing::info!(target: "collect", combined = combined.len(), "hybrid collection finished");

        TrendSnapshot {
            engine: HYBRID_ENGINE.to_string(),
            period: REALTIME_PERIOD.to_string(),
            collected_at: now,
            sources,
            combined,
        }
    }

    /// Google News RSS keywords, or `None` when the feed failed or was empty.
    ///
    /// Scored as the `google_rss` feed (no table weight, 1.0) and filed under `news`.
    pub async fn collect_headlines(&self) -> Option<Vec<KeywordScore>> {
        ensure_metrics_described();
        self.pacer.acquire().await;
        let texts = self.headline.gather_texts().await;
        if texts.is_empty() {
            return None;
        }
        let tokens = extract_all(&texts);
        Some(score_tokens_with_weight(
            &tokens,
            self.headline.source(),
            source_weights::weight_for(HEADLINE_FEED),
            self.headline.top_k,
        ))
    }
}

/// Snapshot holding a single source list; `combined` is that list re-tagged.
pub fn single_source_snapshot(
    source: Source,
    list: Vec<KeywordScore>,
    period: &str,
    collected_at: DateTime<Utc>,
    top_k: usize,
) -> TrendSnapshot {
    let combined = aggregate([list.as_slice()], top_k);
    let mut sources = BTreeMap::new();
    sources.insert(source, list);
    TrendSnapshot {
        engine: source.as_str().to_string(),
        period: period.to_string(),
        collected_at,
        sources,
        combined,
    }
}

/// Full cycle: collect, persist the hybrid snapshot and every non-empty
/// per-source snapshot. Provider failures never fail the cycle; storage does.
pub async fn run_cycle(pipeline: &CollectionPipeline, store: &dyn TrendStore) -> StoreResult<TrendSnapshot> {
    let snapshot = pipeline.collect_hybrid().await;

    store.save(HYBRID_ENGINE, REALTIME_PERIOD, &snapshot).await?;

    for (source, list) in &snapshot.sources {
        if list.is_empty() {
            continue;
        }
        let single = single_source_snapshot(
            *source,
            list.clone(),
            REALTIME_PERIOD,
            snapshot.collected_at,
            pipeline.combined_top_k,
        );
        store.save(source.as_str(), REALTIME_PERIOD, &single).await?;
    }

    Ok(snapshot)
}
