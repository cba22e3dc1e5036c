// src/live/mod.rs
//! Provider-native realtime rankings (Google daily trends, Naver DataLab)
//! served through the response cache.

pub mod google;
pub mod naver;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use metrics::counter;

use crate::cache::ResponseCache;
use crate::types::RankedKeyword;

#[async_trait]
pub trait LiveRanking: Send + Sync {
    async fn fetch(&self, period: &str) -> Result<Vec<RankedKeyword>>;
    fn engine(&self) -> &'static str;
}

pub type RankingCache = dyn ResponseCache<Vec<RankedKeyword>>;

#[derive(Debug, Clone, PartialEq)]
pub struct LiveResult {
    pub keywords: Vec<RankedKeyword>,
    pub cached: bool,
}

/// Engine name → provider, all sharing one cache.
pub struct LiveTrends {
    providers: HashMap<&'static str, Arc<dyn LiveRanking>>,
    cache: Arc<RankingCache>,
    ttl: Duration,
}

impl LiveTrends {
    pub fn new(cache: Arc<RankingCache>, ttl: Duration) -> Self {
        Self {
            providers: HashMap::new(),
            cache,
            ttl,
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn LiveRanking>) -> Self {
        self.providers.insert(provider.engine(), provider);
        self
    }

    /// Cached ranking for `(engine, period)`; `None` for an unknown engine.
    /// Failed fetches are not cached.
    pub async fn ranking(&self, engine: &str, period: &str) -> Option<Result<LiveResult>> {
        let provider = self.providers.get(engine)?;
        let key = cache_key(engine, period);

        if let Some(hit) = self.cache.get(&key) {
            counter!("live_cache_hits_total").increment(1);
            return Some(Ok(LiveResult {
                keywords: hit.value,
                cached: true,
            }));
        }
        counter!("live_cache_misses_total").increment(1);

        let res = provider.fetch(period).await.map(|keywords| {
            self.cache.put(&key, keywords.clone(), self.ttl);
            tracing::info!(target: "live", engine, period, keywords = keywords.len(), "live ranking refreshed");
            LiveResult {
                keywords,
                cached: false,
            }
        });
        Some(res)
    }
}

pub fn cache_key(engine: &str, period: &str) -> String {
    format!("{engine}:{period}")
}

/// Inclusive date window for a period tag ending at `today`.
/// Unknown tags behave like `realtime`.
pub fn date_range(period: &str, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let back = match period {
        "weekly" => 6,
        "monthly" => 29,
        "yearly" => 364,
        _ => 0,
    };
    let start = today.checked_sub_days(Days::new(back)).unwrap_or(today);
    (start, today)
}
