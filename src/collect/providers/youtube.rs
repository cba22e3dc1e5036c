// src/collect/providers/youtube.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::collect::normalize_text;
use crate::collect::providers::get_text;
use crate::collect::types::{MissingCredential, TextFeed};

const VIDEOS: &str = "https://www.googleapis.com/youtube/v3/videos";

#[derive(Debug, Deserialize)]
struct Resp {
    #[serde(default)]
    items: Vec<Video>,
}

#[derive(Debug, Deserialize)]
struct Video {
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

/// Most popular videos in Korea: title plus description. Needs `YOUTUBE_API_KEY`.
pub struct YoutubePopular {
    client: reqwest::Client,
    api_key: Option<String>,
    max_results: u32,
}

impl YoutubePopular {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            max_results: 10,
        }
    }

    pub fn parse_texts(json: &str) -> Result<Vec<String>> {
        let resp: Resp = serde_json::from_str(json).context("decoding youtube json")?;
        Ok(resp
            .items
            .into_iter()
            .filter_map(|v| v.snippet)
            .map(|s| normalize_text(&format!("{} {}", s.title, s.description)))
            .filter(|t| !t.is_empty())
            .collect())
    }
}

#[async_trait]
impl TextFeed for YoutubePopular {
    async fn fetch_texts(&self) -> Result<Vec<String>> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(MissingCredential("YOUTUBE_API_KEY"))?;
        let max = self.max_results.to_string();
        let req = self.client.get(VIDEOS).query(&[
            ("part", "snippet"),
            ("chart", "mostPopular"),
            ("regionCode", "KR"),
            ("maxResults", max.as_str()),
            ("key", key),
        ]);
        let body = get_text(req, "youtube").await?;
        Self::parse_texts(&body)
    }

    fn name(&self) -> &'static str {
        "youtube"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_title_and_description() {
        let json = r#"{"items":[
            {"id":"a","snippet":{"title":"뉴진스 신곡 MV","description":"공식\n뮤직비디오"}},
            {"id":"b","snippet":{"title":"먹방 브이로그"}},
            {"id":"c"}
        ]}"#;
        let out = YoutubePopular::parse_texts(json).unwrap();
        assert_eq!(out, vec!["뉴진스 신곡 MV 공식 뮤직비디오", "먹방 브이로그"]);
    }

    #[test]
    fn error_payload_without_items_is_empty() {
        let json = r#"{"error":{"code":403,"message":"quota"}}"#;
        assert!(YoutubePopular::parse_texts(json).unwrap().is_empty());
    }
}
