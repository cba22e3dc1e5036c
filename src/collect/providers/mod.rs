// src/collect/providers/mod.rs
//! Upstream feeds, one module per provider.

pub mod google_news_rss;
pub mod naver_autocomplete;
pub mod naver_news;
pub mod naver_shopping;
pub mod news_api;
pub mod youtube;

use anyhow::{Context, Result};
use std::time::Duration;

/// Browser-like UA; the Naver pages reject obvious bots.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .connect_timeout(Duration::from_secs(4).min(timeout))
        .timeout(timeout)
        .build()
        .context("building http client")
}

/// Send, reject non-2xx, return the body.
pub(crate) async fn get_text(req: reqwest::RequestBuilder, what: &str) -> Result<String> {
    let resp = req
        .send()
        .await
        .with_context(|| format!("{what}: request failed"))?
        .error_for_status()
        .with_context(|| format!("{what}: http error"))?;
    resp.text()
        .await
        .with_context(|| format!("{what}: reading body"))
}
