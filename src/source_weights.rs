//! # Source Weights
//!
//! Fixed multipliers applied to raw keyword counts per source.
//!
//! | source   | weight |
//! |----------|--------|
//! | news     | 3.0    |
//! | social   | 2.0    |
//! | shopping | 1.5    |
//! | search   | 1.0    |
//! | other    | 1.0    |
//!
//! Pure lookup. Source identifiers are matched case-insensitively.

use crate::types::Source;

/// Weight used for identifiers that do not name a known source.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Weight for a typed source.
pub fn weight(source: Source) -> f64 {
    match source {
        Source::News => 3.0,
        Source::Social => 2.0,
        Source::Shopping => 1.5,
        Source::Search => 1.0,
        Source::Combined => DEFAULT_WEIGHT,
    }
}

/// Weight for a raw source identifier, e.g. taken from a request.
pub fn weight_for(source: &str) -> f64 {
    Source::parse(source).map(weight).unwrap_or(DEFAULT_WEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_table() {
        assert_eq!(weight(Source::News), 3.0);
        assert_eq!(weight(Source::Social), 2.0);
        assert_eq!(weight(Source::Shopping), 1.5);
        assert_eq!(weight(Source::Search), 1.0);
    }

    #[test]
    fn string_lookup_is_case_insensitive() {
        assert_eq!(weight_for("News"), 3.0);
        assert_eq!(weight_for("SOCIAL"), 2.0);
    }

    #[test]
    fn unknown_source_gets_default() {
        assert_eq!(weight_for("google_rss"), DEFAULT_WEIGHT);
        assert_eq!(weight_for(""), DEFAULT_WEIGHT);
    }
}
