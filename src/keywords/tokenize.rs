// src/keywords/tokenize.rs
//! Keyword extraction: clean, split, length filter, stop-word filter.

use once_cell::sync::OnceCell;
use regex::Regex;

/// Shortest token kept, in characters.
pub const MIN_TOKEN_CHARS: usize = 2;
/// Longest token kept, in characters.
pub const MAX_TOKEN_CHARS: usize = 10;

/// Short functional words never reported as keywords.
pub const STOP_WORDS: &[&str] = &[
    "이", "그", "저", "것", "수", "등", "때", "곳", "말", "일", "년", "월", "시", "분", "초",
];

fn non_keyword_chars() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    // Hangul syllables, ASCII letters/digits and whitespace survive.
    RE.get_or_init(|| Regex::new(r"[^가-힣A-Za-z0-9\s]").expect("static regex"))
}

/// True when `c` may appear inside a keyword.
pub fn is_keyword_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ('가'..='힣').contains(&c)
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Extract candidate keyword tokens from free text.
///
/// Output keeps input order and is not deduplicated.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let cleaned = non_keyword_chars().replace_all(text, " ");
    cleaned
        .split_whitespace()
        .filter(|w| (MIN_TOKEN_CHARS..=MAX_TOKEN_CHARS).contains(&w.chars().count()))
        .filter(|w| !is_stop_word(w))
        .map(str::to_string)
        .collect()
}

/// Extract tokens from every text in order.
pub fn extract_all<I, S>(texts: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts
        .into_iter()
        .flat_map(|t| extract_keywords(t.as_ref()))
        .collect()
}
