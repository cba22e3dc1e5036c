// src/collect/providers/naver_shopping.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::counter;
use serde::Deserialize;

use crate::collect::normalize_text;
use crate::collect::providers::get_text;
use crate::collect::types::{MissingCredential, TextFeed};
use crate::config::NaverCredentials;

const SHOP_SEARCH: &str = "https://openapi.naver.com/v1/search/shop.json";

pub const DEFAULT_CATEGORIES: [&str; 4] = ["패션", "전자제품", "식품", "뷰티"];

#[derive(Debug, Deserialize)]
struct Resp {
    #[serde(default)]
    items: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct Product {
    title: Option<String>,
}

/// Naver shopping search, a handful of products per category.
pub struct NaverShopping {
    client: reqwest::Client,
    credentials: Option<NaverCredentials>,
    categories: Vec<String>,
    per_category: u32,
}

impl NaverShopping {
    pub fn new(client: reqwest::Client, credentials: Option<NaverCredentials>) -> Self {
        Self {
            client,
            credentials,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            per_category: 5,
        }
    }

    /// Product titles with the `<b>` highlight markup removed.
    pub fn parse_titles(json: &str) -> Result<Vec<String>> {
        let resp: Resp = serde_json::from_str(json).context("decoding naver shop json")?;
        Ok(resp
            .items
            .into_iter()
            .filter_map(|p| p.title)
            .map(|t| normalize_text(&t))
            .filter(|t| !t.is_empty())
            .collect())
    }

    async fn fetch_category(&self, creds: &NaverCredentials, category: &str) -> Result<Vec<String>> {
        let display = self.per_category.to_string();
        let req = self
            .client
            .get(SHOP_SEARCH)
            .header("X-Naver-Client-Id", &creds.client_id)
            .header("X-Naver-Client-Secret", &creds.client_secret)
            .query(&[("query", category), ("display", display.as_str()), ("sort", "sim")]);
        let body = get_text(req, "naver shopping").await?;
        Self::parse_titles(&body)
    }
}

#[async_trait]
impl TextFeed for NaverShopping {
    async fn fetch_texts(&self) -> Result<Vec<String>> {
        let creds = self
            .credentials
            .as_ref()
            .ok_or(MissingCredential("NAVER_CLIENT_ID/NAVER_CLIENT_SECRET"))?;

        let mut out = Vec::new();
        for category in &self.categories {
            match self.fetch_category(creds, category).await {
                Ok(mut titles) => out.append(&mut titles),
                Err(e) => {
                    tracing::warn!(error = ?e, provider = self.name(), category = %category, "category fetch failed");
                    counter!("collect_provider_errors_total", "provider" => self.name()).increment(1);
                }
            }
        }
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "naver_shopping"
    }
}
