// src/keywords/count.rs
//! Frequency counting with first-seen ordering.

use std::collections::HashMap;

/// Token → count mapping that remembers first-appearance order.
///
/// Matching is exact and case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct TokenCounts {
    order: Vec<(String, u32)>,
    index: HashMap<String, usize>,
}

impl TokenCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, token: &str) {
        match self.index.get(token) {
            Some(&i) => self.order[i].1 += 1,
            None => {
                self.index.insert(token.to_string(), self.order.len());
                self.order.push((token.to_string(), 1));
            }
        }
    }

    pub fn get(&self, token: &str) -> u32 {
        self.index.get(token).map(|&i| self.order[i].1).unwrap_or(0)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum of all counts; equals the number of tokens added.
    pub fn total(&self) -> u64 {
        self.order.iter().map(|(_, c)| u64::from(*c)).sum()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.order.iter().map(|(t, c)| (t.as_str(), *c))
    }
}

impl<S: AsRef<str>> FromIterator<S> for TokenCounts {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut counts = TokenCounts::new();
        for t in iter {
            counts.add(t.as_ref());
        }
        counts
    }
}

/// Count tokens.
pub fn count_tokens<S: AsRef<str>>(tokens: &[S]) -> TokenCounts {
    tokens.iter().collect()
}
