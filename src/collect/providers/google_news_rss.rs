// src/collect/providers/google_news_rss.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use quick_xml::de::from_str;
use serde::Deserialize;

use crate::collect::normalize_text;
use crate::collect::providers::get_text;
use crate::collect::types::TextFeed;

pub const GOOGLE_NEWS_KR_RSS: &str = "https://news.google.com/rss?hl=ko&gl=KR&ceid=KR:ko";

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
}

/// Korean Google News front page, item titles only.
pub struct GoogleNewsRss {
    client: reqwest::Client,
    url: String,
}

impl GoogleNewsRss {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            url: GOOGLE_NEWS_KR_RSS.to_string(),
        }
    }

    pub fn parse_titles(xml: &str) -> Result<Vec<String>> {
        let xml_clean = scrub_html_entities_for_xml(xml);
        let rss: Rss = from_str(&xml_clean).context("parsing google news rss xml")?;
        Ok(rss
            .channel
            .item
            .into_iter()
            .filter_map(|it| it.title)
            .map(|t| normalize_text(&t))
            .filter(|t| !t.is_empty())
            .collect())
    }
}

#[async_trait]
impl TextFeed for GoogleNewsRss {
    async fn fetch_texts(&self) -> Result<Vec<String>> {
        let body = get_text(self.client.get(&self.url), "google news rss").await?;
        Self::parse_titles(&body)
    }

    fn name(&self) -> &'static str {
        "google_news_rss"
    }
}

// XML only knows the five predefined entities; feeds occasionally leak HTML ones.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&middot;", "·")
        .replace("&hellip;", "…")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel>
<title>주요 뉴스 - Google 뉴스</title>
<link>https://news.google.com</link>
<item><title>부동산 가격 상승 전망 - 한국경제</title><link>https://a</link><pubDate>Mon, 20 Oct 2025 01:00:00 GMT</pubDate></item>
<item><title>반도체 수출 &amp; 환율&nbsp;급등 - 연합뉴스</title><link>https://b</link></item>
<item><link>https://c</link></item>
</channel></rss>"#;

    #[test]
    fn parses_item_titles() {
        let titles = GoogleNewsRss::parse_titles(FEED).unwrap();
        assert_eq!(
            titles,
            vec!["부동산 가격 상승 전망 - 한국경제", "반도체 수출 & 환율 급등 - 연합뉴스"]
        );
    }

    #[test]
    fn empty_channel_is_ok() {
        let titles = GoogleNewsRss::parse_titles("<rss><channel><title>x</title></channel></rss>")
            .unwrap();
        assert!(titles.is_empty());
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(GoogleNewsRss::parse_titles("not xml at all").is_err());
    }
}
