//! Sentence splitting on terminal punctuation.

use std::sync::LazyLock;

use regex_lite::Regex;

static TERMINATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").expect("TERMINATORS regex should compile"));

/// Trimmed, non-empty fragments between runs of `.`, `!` or `?`.
///
/// Terminators are consumed, so fragments never end with punctuation.
pub fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
	TERMINATORS.split(text).map(str::trim).filter(|s| !s.is_empty())
}
