// src/keywords/mod.rs
//! Keyword pipeline: tokenize → count → weight → top-K, plus the cross-source merge.

pub mod aggregate;
pub mod count;
pub mod rank;
pub mod tokenize;

pub use aggregate::aggregate;
pub use count::{count_tokens, TokenCounts};
pub use rank::{score_tokens, score_tokens_with_weight, top_k, COMBINED_TOP_K, SOURCE_TOP_K};
pub use tokenize::{extract_all, extract_keywords};
