// src/config.rs
//! Runtime configuration: provider credentials from the environment and
//! tuning knobs from an optional TOML file.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_CONFIG_PATH: &str = "TRENDS_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/trends.toml";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/trends.db";

/// Tuning knobs. Every field has a default so the file may be partial.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Minimum spacing between collector jobs in one cycle.
    pub request_interval_ms: u64,
    pub source_top_k: usize,
    pub combined_top_k: usize,
    /// List length for the single-source Google News headline collection.
    pub headline_top_k: usize,
    pub live_cache_ttl_secs: u64,
    /// 0 disables the background schedule.
    pub schedule_interval_secs: u64,
    pub http_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            request_interval_ms: 1_000,
            source_top_k: 10,
            combined_top_k: 20,
            headline_top_k: 20,
            live_cache_ttl_secs: 300,
            schedule_interval_secs: 0,
            http_timeout_secs: 10,
        }
    }
}

impl Settings {
    pub fn request_interval(&self) -> Duration {
        Duration::from_millis(self.request_interval_ms)
    }

    pub fn live_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.live_cache_ttl_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.max(1))
    }

    pub fn schedule_interval(&self) -> Option<Duration> {
        (self.schedule_interval_secs > 0).then(|| Duration::from_secs(self.schedule_interval_secs))
    }
}

/// Provider credentials. Each one is optional; an absent credential disables
/// the feeds that need it without failing a collection cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub news_api_key: Option<String>,
    pub youtube_api_key: Option<String>,
    pub naver_client_id: Option<String>,
    pub naver_client_secret: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self {
            news_api_key: env_nonempty("NEWS_API_KEY"),
            youtube_api_key: env_nonempty("YOUTUBE_API_KEY"),
            naver_client_id: env_nonempty("NAVER_CLIENT_ID"),
            naver_client_secret: env_nonempty("NAVER_CLIENT_SECRET"),
        }
    }

    /// Both Naver credentials, if present.
    pub fn naver(&self) -> Option<NaverCredentials> {
        match (&self.naver_client_id, &self.naver_client_secret) {
            (Some(id), Some(secret)) => Some(NaverCredentials {
                client_id: id.clone(),
                client_secret: secret.clone(),
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaverCredentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub credentials: Credentials,
    pub settings: Settings,
}

impl AppConfig {
    /// Environment + `load_settings_default()`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env_nonempty("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            credentials: Credentials::from_env(),
            settings: load_settings_default()?,
        })
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Load settings from an explicit TOML path.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading settings from {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing settings in {}", path.display()))
}

/// Load settings using env var + fallbacks:
/// 1) $TRENDS_CONFIG_PATH
/// 2) config/trends.toml
/// 3) built-in defaults
pub fn load_settings_default() -> Result<Settings> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_settings_from(&pb);
        }
        return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
    }
    let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
    if default_p.exists() {
        return load_settings_from(&default_p);
    }
    Ok(Settings::default())
}
