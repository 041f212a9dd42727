//! Shared text cleanup helpers.

use std::sync::LazyLock;

use regex_lite::Regex;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE regex should compile"));

/// Collapse every whitespace run, line breaks included, to one space, then trim.
pub(crate) fn normalize_text(raw: &str) -> String {
	let spaced = raw.replace('\u{a0}', " ");
	WHITESPACE.replace_all(&spaced, " ").trim().to_string()
}

/// Cut `text` to at most `max` characters. No ellipsis is appended.
pub(crate) fn truncate_chars(text: String, max: usize) -> String {
	match text.char_indices().nth(max) {
		Some((byte_index, _)) => text[..byte_index].to_string(),
		None => text,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn collapses_all_whitespace_to_single_spaces() {
		let raw = "  Hello \t\u{a0} world \n\n\n  \n second   line \r\n";
		assert_eq!(normalize_text(raw), "Hello world second line");
	}

	#[test]
	fn truncates_on_char_boundaries() {
		assert_eq!(truncate_chars("héllo".into(), 2), "hé");
		assert_eq!(truncate_chars("short".into(), 10), "short");
		assert_eq!(truncate_chars("重要的事".into(), 3).chars().count(), 3);
	}
}
