// src/collect/providers/news_api.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::collect::normalize_text;
use crate::collect::providers::get_text;
use crate::collect::types::{MissingCredential, TextFeed};

const TOP_HEADLINES: &str = "https://newsapi.org/v2/top-headlines";

#[derive(Debug, Deserialize)]
struct Resp {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
}

/// NewsAPI top headlines for Korea. Needs `NEWS_API_KEY`.
pub struct NewsApiHeadlines {
    client: reqwest::Client,
    api_key: Option<String>,
    page_size: u32,
}

impl NewsApiHeadlines {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            page_size: 20,
        }
    }

    pub fn parse_titles(json: &str) -> Result<Vec<String>> {
        let resp: Resp = serde_json::from_str(json).context("decoding newsapi json")?;
        Ok(resp
            .articles
            .into_iter()
            .filter_map(|a| a.title)
            .map(|t| normalize_text(&t))
            .filter(|t| !t.is_empty())
            .collect())
    }
}

#[async_trait]
impl TextFeed for NewsApiHeadlines {
    async fn fetch_texts(&self) -> Result<Vec<String>> {
        let key = self.api_key.as_deref().ok_or(MissingCredential("NEWS_API_KEY"))?;
        let page_size = self.page_size.to_string();
        let req = self.client.get(TOP_HEADLINES).query(&[
            ("country", "kr"),
            ("apiKey", key),
            ("pageSize", page_size.as_str()),
        ]);
        let body = get_text(req, "newsapi").await?;
        Self::parse_titles(&body)
    }

    fn name(&self) -> &'static str {
        "newsapi"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_from_articles() {
        let json = r#"{"status":"ok","totalResults":3,"articles":[
            {"title":"금리 동결 결정","source":{"name":"KBS"}},
            {"title":null},
            {"title":"<b>코스피</b> 반등"}
        ]}"#;
        let out = NewsApiHeadlines::parse_titles(json).unwrap();
        assert_eq!(out, vec!["금리 동결 결정", "코스피 반등"]);
    }

    #[test]
    fn missing_articles_is_empty() {
        let out = NewsApiHeadlines::parse_titles(r#"{"status":"ok"}"#).unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let feed = NewsApiHeadlines::new(reqwest::Client::new(), None);
        let err = feed.fetch_texts().await.unwrap_err();
        assert!(err.downcast_ref::<MissingCredential>().is_some());
    }
}
