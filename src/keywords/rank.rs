// src/keywords/rank.rs
//! Top-K selection and per-source scoring.

use crate::keywords::count::TokenCounts;
use crate::source_weights;
use crate::types::{KeywordScore, Source};

/// Per-source list length.
pub const SOURCE_TOP_K: usize = 10;
/// Combined list length.
pub const COMBINED_TOP_K: usize = 20;

/// Return the `n` highest-scoring entries, descending.
///
/// Ties keep the input order (stable sort).
pub fn top_k<K, I>(entries: I, n: usize) -> Vec<(K, f64)>
where
    I: IntoIterator<Item = (K, f64)>,
{
    let mut v: Vec<(K, f64)> = entries.into_iter().collect();
    v.sort_by(|a, b| b.1.total_cmp(&a.1));
    v.truncate(n);
    v
}

/// Multiply counts by `w` and keep the top `n`; entries are tagged `source`.
pub fn score_counts_with_weight(counts: &TokenCounts, source: Source, w: f64, n: usize) -> Vec<KeywordScore> {
    let ranked = top_k(counts.iter().map(|(t, c)| ((t, c), f64::from(c) * w)), n);
    ranked
        .into_iter()
        .map(|((keyword, count), score)| KeywordScore {
            keyword: keyword.to_string(),
            count,
            score,
            source,
        })
        .collect()
}

/// Counter → weighter → top-K for one source's tokens.
pub fn score_tokens<S: AsRef<str>>(tokens: &[S], source: Source, n: usize) -> Vec<KeywordScore> {
    score_tokens_with_weight(tokens, source, source_weights::weight(source), n)
}

pub fn score_tokens_with_weight<S: AsRef<str>>(
    tokens: &[S],
    source: Source,
    w: f64,
    n: usize,
) -> Vec<KeywordScore> {
    if tokens.is_empty() {
        return Vec::new();
    }
    let counts: TokenCounts = tokens.iter().collect();
    score_counts_with_weight(&counts, source, w, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::tokenize::extract_all;

    #[test]
    fn top_k_sorted_and_truncated() {
        let out = top_k(vec![("a", 1.0), ("b", 5.0), ("c", 3.0), ("d", 4.0)], 3);
        assert_eq!(out, vec![("b", 5.0), ("d", 4.0), ("c", 3.0)]);
    }

    #[test]
    fn top_k_ties_keep_insertion_order() {
        let out = top_k(vec![("x", 2.0), ("y", 3.0), ("z", 2.0), ("w", 2.0)], 3);
        assert_eq!(out, vec![("y", 3.0), ("x", 2.0), ("z", 2.0)]);
    }

    #[test]
    fn top_k_length_is_min_of_n_and_input() {
        for (len, n) in [(0usize, 5usize), (3, 5), (5, 5), (12, 5), (7, 0)] {
            let input: Vec<(usize, f64)> = (0..len).map(|i| (i, ((i * 7) % 5) as f64)).collect();
            let out = top_k(input, n);
            assert_eq!(out.len(), len.min(n));
            assert!(out.windows(2).all(|w| w[0].1 >= w[1].1));
        }
    }

    #[test]
    fn news_titles_score_with_weight() {
        let tokens = extract_all(["부동산 가격 상승", "부동산 전망 밝다"]);
        let out = score_tokens(&tokens, Source::News, SOURCE_TOP_K);
        assert_eq!(out[0].keyword, "부동산");
        assert_eq!(out[0].count, 2);
        assert_eq!(out[0].score, 6.0);
        assert_eq!(out[0].source, Source::News);
        // remaining tokens tie at 3.0 and keep first-seen order
        let rest: Vec<_> = out[1..].iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(rest, vec!["가격", "상승", "전망", "밝다"]);
    }

    #[test]
    fn explicit_weight_overrides_the_table() {
        let tokens = extract_all(["환율 급등", "환율 안정"]);
        let w = source_weights::weight_for("google_rss");
        let out = score_tokens_with_weight(&tokens, Source::News, w, 20);
        assert_eq!(out[0].keyword, "환율");
        assert_eq!(out[0].score, 2.0);
        assert_eq!(out[0].source, Source::News);
    }

    #[test]
    fn per_source_list_capped() {
        let tokens: Vec<String> = (0..25).map(|i| format!("kw{i:02}")).collect();
        let out = score_tokens(&tokens, Source::Shopping, SOURCE_TOP_K);
        assert_eq!(out.len(), SOURCE_TOP_K);
        assert!(out.iter().all(|k| k.score == 1.5));
        assert_eq!(out[0].keyword, "kw00");
    }

    #[test]
    fn empty_tokens_yield_empty_list() {
        let out = score_tokens::<String>(&[], Source::Search, SOURCE_TOP_K);
        assert!(out.is_empty());
    }
}
