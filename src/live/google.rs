// src/live/google.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::collect::providers::get_text;
use crate::live::LiveRanking;
use crate::types::RankedKeyword;

const DAILY_TRENDS: &str = "https://trends.google.com/trends/api/dailytrends";

/// Anti-JSON-hijacking guard Google prepends to the body.
const XSSI_PREFIX: &str = ")]}',";

#[derive(Debug, Deserialize)]
struct Resp {
    #[serde(rename = "default")]
    payload: Payload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Payload {
    #[serde(default)]
    trending_searches_days: Vec<Day>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Day {
    #[serde(default)]
    trending_searches: Vec<Search>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Search {
    title: Title,
    formatted_traffic: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Title {
    query: String,
}

/// Google Trends daily searches for Korea.
pub struct GoogleDailyTrends {
    client: reqwest::Client,
}

impl GoogleDailyTrends {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Most recent day only, ranked in response order.
    pub fn parse(body: &str) -> Result<Vec<RankedKeyword>> {
        let json = body.trim_start().trim_start_matches(XSSI_PREFIX);
        let resp: Resp = serde_json::from_str(json).context("decoding google daily trends")?;
        let Some(day) = resp.payload.trending_searches_days.into_iter().next() else {
            return Ok(Vec::new());
        };
        Ok(day
            .trending_searches
            .into_iter()
            .filter(|s| !s.title.query.trim().is_empty())
            .enumerate()
            .map(|(i, s)| RankedKeyword {
                keyword: s.title.query.trim().to_string(),
                rank: i as u32 + 1,
                search_count: s.formatted_traffic,
                diff: None,
                ratio: None,
            })
            .collect())
    }
}

#[async_trait]
impl LiveRanking for GoogleDailyTrends {
    async fn fetch(&self, _period: &str) -> Result<Vec<RankedKeyword>> {
        let req = self.client.get(DAILY_TRENDS).query(&[
            ("hl", "ko"),
            ("tz", "-540"),
            ("geo", "KR"),
            ("ns", "15"),
        ]);
        let body = get_text(req, "google daily trends").await?;
        Self::parse(&body)
    }

    fn engine(&self) -> &'static str {
        "google"
    }
}
