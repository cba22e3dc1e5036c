// src/types.rs
//! Core data model shared by collectors, storage and the HTTP layer.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a keyword score came from. `Combined` marks cross-source aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    News,
    Social,
    Shopping,
    Search,
    Combined,
}

impl Source {
    /// The four collected sources, in collection order.
    pub const COLLECTED: [Source; 4] = [Source::News, Source::Social, Source::Shopping, Source::Search];

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::News => "news",
            Source::Social => "social",
            Source::Shopping => "shopping",
            Source::Search => "search",
            Source::Combined => "combined",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "news" => Some(Source::News),
            "social" => Some(Source::Social),
            "shopping" => Some(Source::Shopping),
            "search" => Some(Source::Search),
            "combined" => Some(Source::Combined),
            _ => None,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ranked keyword with its raw count and weighted score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordScore {
    pub keyword: String,
    pub count: u32,
    pub score: f64,
    pub source: Source,
}

/// Result of one collection cycle for an `(engine, period)` key.
///
/// `combined` is sorted descending by score and is the top-K merge of `sources`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSnapshot {
    pub engine: String,
    pub period: String,
    pub collected_at: DateTime<Utc>,
    #[serde(default)]
    pub sources: BTreeMap<Source, Vec<KeywordScore>>,
    #[serde(default)]
    pub combined: Vec<KeywordScore>,
}

/// A persisted snapshot row as returned by the query endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTrend {
    pub id: i64,
    pub engine: String,
    pub period: String,
    pub created_at: DateTime<Utc>,
    pub data: TrendSnapshot,
}

/// Entry of a provider-native ranking (Google daily trends, Naver DataLab).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedKeyword {
    pub keyword: String,
    pub rank: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_serializes_lowercase() {
        let v = serde_json::to_string(&Source::Shopping).unwrap();
        assert_eq!(v, "\"shopping\"");
        assert_eq!(Source::parse(" NEWS "), Some(Source::News));
        assert_eq!(Source::parse("hybrid"), None);
    }

    #[test]
    fn snapshot_sources_keyed_by_name() {
        let mut sources = BTreeMap::new();
        sources.insert(
            Source::Social,
            vec![KeywordScore {
                keyword: "BTS".into(),
                count: 2,
                score: 4.0,
                source: Source::Social,
            }],
        );
        let snap = TrendSnapshot {
            engine: "hybrid".into(),
            period: "realtime".into(),
            collected_at: Utc::now(),
            sources,
            combined: vec![],
        };
        let v = serde_json::to_value(&snap).unwrap();
        assert_eq!(v["sources"]["social"][0]["keyword"], "BTS");
        assert!(v["combined"].as_array().unwrap().is_empty());
    }

    #[test]
    fn ranked_keyword_omits_absent_fields() {
        let k = RankedKeyword {
            keyword: "날씨".into(),
            rank: 1,
            search_count: Some("20만+".into()),
            diff: None,
            ratio: None,
        };
        let v = serde_json::to_value(&k).unwrap();
        assert_eq!(v["searchCount"], "20만+");
        assert!(v.get("ratio").is_none());
        assert!(v.get("diff").is_none());
    }
}
