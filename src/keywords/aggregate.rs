// src/keywords/aggregate.rs
//! Cross-source merge: sum scores per exact keyword, then top-K.

use std::collections::HashMap;

use crate::keywords::rank::top_k;
use crate::types::{KeywordScore, Source};

/// Merge per-source lists into one ranked list tagged `combined`.
///
/// Keywords are matched exactly. `count` is the sum of the contributing counts.
pub fn aggregate<'a, I>(lists: I, n: usize) -> Vec<KeywordScore>
where
    I: IntoIterator<Item = &'a [KeywordScore]>,
{
    let mut order: Vec<(String, u32, f64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for list in lists {
        for ks in list {
            match index.get(&ks.keyword) {
                Some(&i) => {
                    order[i].1 += ks.count;
                    order[i].2 += ks.score;
                }
                None => {
                    index.insert(ks.keyword.clone(), order.len());
                    order.push((ks.keyword.clone(), ks.count, ks.score));
                }
            }
        }
    }

    top_k(order.into_iter().map(|(k, c, s)| ((k, c), s)), n)
        .into_iter()
        .map(|((keyword, count), score)| KeywordScore {
            keyword,
            count,
            score,
            source: Source::Combined,
        })
        .collect()
}
