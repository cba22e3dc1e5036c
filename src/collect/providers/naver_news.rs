// src/collect/providers/naver_news.rs
//! Naver news section page, scraped for headline anchors.

use anyhow::Result;
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use regex::Regex;

use crate::collect::normalize_text;
use crate::collect::providers::get_text;
use crate::collect::types::TextFeed;

pub const NAVER_POLITICS_SECTION: &str =
    "https://news.naver.com/main/main.naver?mode=LSD&mid=shm&sid1=100";

const MAX_TITLES: usize = 20;

fn title_anchor() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| {
        Regex::new(r#"<a[^>]*class="[^"]*title[^"]*"[^>]*>([^<]+)</a>"#).expect("static regex")
    })
}

pub struct NaverNewsScraper {
    client: reqwest::Client,
    url: String,
}

impl NaverNewsScraper {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            url: NAVER_POLITICS_SECTION.to_string(),
        }
    }

    /// Inner text of the first 20 anchors whose class mentions `title`.
    pub fn extract_titles(html: &str) -> Vec<String> {
        title_anchor()
            .captures_iter(html)
            .filter_map(|c| c.get(1))
            .map(|m| normalize_text(m.as_str()))
            .filter(|t| !t.is_empty())
            .take(MAX_TITLES)
            .collect()
    }
}

#[async_trait]
impl TextFeed for NaverNewsScraper {
    async fn fetch_texts(&self) -> Result<Vec<String>> {
        let html = get_text(self.client.get(&self.url), "naver news page").await?;
        Ok(Self::extract_titles(&html))
    }

    fn name(&self) -> &'static str {
        "naver_news"
    }
}
