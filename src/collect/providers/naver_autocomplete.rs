// src/collect/providers/naver_autocomplete.rs
//! Naver search autocomplete, used as a cheap "what people type" signal.

use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::counter;
use serde::Deserialize;
use serde_json::Value;

use crate::collect::normalize_text;
use crate::collect::providers::get_text;
use crate::collect::types::TextFeed;

const AUTOCOMPLETE: &str = "https://ac.search.naver.com/nx/ac";

pub const DEFAULT_SEED_TERMS: [&str; 4] = ["인기", "트렌드", "핫", "바이럴"];

const SUGGESTIONS_PER_TERM: usize = 5;

#[derive(Debug, Deserialize)]
struct Resp {
    #[serde(default)]
    items: Vec<Vec<Value>>,
}

pub struct NaverAutocomplete {
    client: reqwest::Client,
    seeds: Vec<String>,
}

impl NaverAutocomplete {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            seeds: DEFAULT_SEED_TERMS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// First five suggestions of the first suggestion group.
    ///
    /// A suggestion is either `["text", ...]` or a bare string.
    pub fn parse_suggestions(json: &str) -> Result<Vec<String>> {
        let resp: Resp = serde_json::from_str(json).context("decoding naver autocomplete json")?;
        let Some(first) = resp.items.into_iter().next() else {
            return Ok(Vec::new());
        };
        Ok(first
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.as_str()),
                Value::Array(a) => a.first().and_then(Value::as_str),
                _ => None,
            })
            .map(normalize_text)
            .filter(|s| !s.is_empty())
            .take(SUGGESTIONS_PER_TERM)
            .collect())
    }

    async fn fetch_term(&self, term: &str) -> Result<Vec<String>> {
        let req = self.client.get(AUTOCOMPLETE).query(&[
            ("q", term),
            ("con", "1"),
            ("frm", "nv"),
            ("ans", "2"),
            ("r_format", "json"),
            ("r_enc", "UTF-8"),
            ("r_unicode", "0"),
            ("t_koreng", "1"),
            ("run", "2"),
        ]);
        let body = get_text(req, "naver autocomplete").await?;
        Self::parse_suggestions(&body)
    }
}

#[async_trait]
impl TextFeed for NaverAutocomplete {
    async fn fetch_texts(&self) -> Result<Vec<String>> {
        let mut out = Vec::new();
        for term in &self.seeds {
            match self.fetch_term(term).await {
                Ok(mut s) => out.append(&mut s),
                Err(e) => {
                    tracing::warn!(error = ?e, provider = self.name(), term = %term, "suggestion fetch failed");
                    counter!("collect_provider_errors_total", "provider" => self.name()).increment(1);
                }
            }
        }
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "naver_autocomplete"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_group_first_five() {
        let json = r#"{"query":["인기"],"items":[
            [["인기 드라마"],["인기 웹툰"],["인기 검색어"],["인기 영화 순위"],["인기 게임"],["인기 노래"]],
            [["다른 그룹"]]
        ]}"#;
        let out = NaverAutocomplete::parse_suggestions(json).unwrap();
        assert_eq!(
            out,
            vec!["인기 드라마", "인기 웹툰", "인기 검색어", "인기 영화 순위", "인기 게임"]
        );
    }

    #[test]
    fn bare_strings_and_empty_items() {
        let out = NaverAutocomplete::parse_suggestions(r#"{"items":[["핫플","핫딜"]]}"#).unwrap();
        assert_eq!(out, vec!["핫플", "핫딜"]);
        let none = NaverAutocomplete::parse_suggestions(r#"{"query":["x"],"items":[]}"#).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn html_error_page_is_an_error() {
        assert!(NaverAutocomplete::parse_suggestions("<html>blocked</html>").is_err());
    }
}
