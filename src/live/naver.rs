// src/live/naver.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::collect::providers::get_text;
use crate::collect::types::MissingCredential;
use crate::config::NaverCredentials;
use crate::live::{date_range, LiveRanking};
use crate::types::RankedKeyword;

const DATALAB_SEARCH: &str = "https://openapi.naver.com/v1/datalab/search";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Req<'a> {
    start_date: String,
    end_date: String,
    time_unit: &'a str,
    keyword_groups: Vec<Group<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Group<'a> {
    group_name: &'a str,
    keywords: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct Resp {
    #[serde(default)]
    results: Vec<GroupResult>,
}

#[derive(Debug, Deserialize)]
struct GroupResult {
    title: String,
    #[serde(default)]
    data: Vec<Point>,
}

#[derive(Debug, Deserialize)]
struct Point {
    ratio: f64,
}

/// Naver DataLab relative search volume per keyword group.
pub struct NaverDatalab {
    client: reqwest::Client,
    credentials: Option<NaverCredentials>,
    groups: Vec<String>,
}

impl NaverDatalab {
    pub fn new(client: reqwest::Client, credentials: Option<NaverCredentials>) -> Self {
        Self {
            client,
            credentials,
            groups: vec!["실시간".to_string()],
        }
    }

    pub fn with_groups(mut self, groups: Vec<String>) -> Self {
        self.groups = groups;
        self
    }

    fn request_body(&self, period: &str, today: NaiveDate) -> Req<'_> {
        let (start, end) = date_range(period, today);
        Req {
            start_date: start.format("%Y-%m-%d").to_string(),
            end_date: end.format("%Y-%m-%d").to_string(),
            time_unit: "date",
            keyword_groups: self
                .groups
                .iter()
                .map(|g| Group {
                    group_name: g,
                    keywords: vec![g.as_str()],
                })
                .collect(),
        }
    }

    /// Groups ranked by their latest ratio, highest first.
    pub fn parse(json: &str) -> Result<Vec<RankedKeyword>> {
        let resp: Resp = serde_json::from_str(json).context("decoding naver datalab json")?;
        let mut rows: Vec<(String, f64)> = resp
            .results
            .into_iter()
            .map(|r| {
                let latest = r.data.last().map(|p| p.ratio).unwrap_or(0.0);
                (r.title, latest)
            })
            .collect();
        rows.sort_by(|a, b| b.1.total_cmp(&a.1));
        Ok(rows
            .into_iter()
            .enumerate()
            .map(|(i, (keyword, ratio))| RankedKeyword {
                keyword,
                rank: i as u32 + 1,
                search_count: None,
                diff: None,
                ratio: Some(ratio),
            })
            .collect())
    }
}

#[async_trait]
impl LiveRanking for NaverDatalab {
    async fn fetch(&self, period: &str) -> Result<Vec<RankedKeyword>> {
        let creds = self
            .credentials
            .as_ref()
            .ok_or(MissingCredential("NAVER_CLIENT_ID/NAVER_CLIENT_SECRET"))?;
        let body = self.request_body(period, Utc::now().date_naive());
        let req = self
            .client
            .post(DATALAB_SEARCH)
            .header("X-Naver-Client-Id", &creds.client_id)
            .header("X-Naver-Client-Secret", &creds.client_secret)
            .json(&body);
        let text = get_text(req, "naver datalab").await?;
        Self::parse(&text)
    }

    fn engine(&self) -> &'static str {
        "naver"
    }
}
