// src/fixtures.rs
//! Hardcoded demo snapshot written by `POST /test-dummy`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::collect::{HYBRID_ENGINE, REALTIME_PERIOD};
use crate::keywords::{aggregate, COMBINED_TOP_K};
use crate::types::{KeywordScore, Source, TrendSnapshot};

fn list(source: Source, rows: &[(&str, f64, u32)]) -> Vec<KeywordScore> {
    rows.iter()
        .map(|&(keyword, score, count)| KeywordScore {
            keyword: keyword.to_string(),
            count,
            score,
            source,
        })
        .collect()
}

pub fn dummy_snapshot(collected_at: DateTime<Utc>) -> TrendSnapshot {
    let mut sources = BTreeMap::new();
    sources.insert(
        Source::News,
        list(
            Source::News,
            &[("대선", 45.0, 15), ("경제", 38.0, 12), ("코로나", 32.0, 10), ("부동산", 28.0, 9), ("교육", 25.0, 8)],
        ),
    );
    sources.insert(
        Source::Social,
        list(
            Source::Social,
            &[("BTS", 42.0, 21), ("블랙핑크", 36.0, 18), ("아이유", 30.0, 15), ("뉴진스", 28.0, 14), ("르세라핌", 24.0, 12)],
        ),
    );
    sources.insert(
        Source::Shopping,
        list(
            Source::Shopping,
            &[("아이폰", 35.0, 23), ("갤럭시", 30.0, 20), ("에어팟", 25.0, 17), ("맥북", 22.0, 15), ("아이패드", 20.0, 13)],
        ),
    );
    sources.insert(
        Source::Search,
        list(
            Source::Search,
            &[("날씨", 40.0, 40), ("맛집", 35.0, 35), ("영화", 30.0, 30), ("게임", 28.0, 28), ("운동", 25.0, 25)],
        ),
    );

    let combined = aggregate(sources.values().map(Vec::as_slice), COMBINED_TOP_K);

    TrendSnapshot {
        engine: HYBRID_ENGINE.to_string(),
        period: REALTIME_PERIOD.to_string(),
        collected_at,
        sources,
        combined,
    }
}
