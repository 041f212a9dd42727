//! Pattern configuration loaded from `patterns.json`.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Deserialize;

use crate::dom::Selector;

static PATTERNS: LazyLock<Patterns> = LazyLock::new(|| {
	let json = include_str!("patterns.json");
	serde_json::from_str(json).expect("Failed to parse patterns.json")
});

static EXCLUDED: LazyLock<Selector> = LazyLock::new(|| Selector::parse(&PATTERNS.exclude.join(", ")).expect("exclusion selectors should parse"));

static CONTENT_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
	PATTERNS
		.content_selectors
		.iter()
		.map(|s| Selector::parse(s).expect("content selector should parse"))
		.collect()
});

static KEYWORDS: LazyLock<Vec<String>> = LazyLock::new(|| PATTERNS.keywords.values().flatten().map(|k| k.to_lowercase()).collect());

#[derive(Debug, Deserialize)]
pub(crate) struct Patterns {
	pub(crate) exclude: Vec<String>,
	pub(crate) content_selectors: Vec<String>,
	/// Importance keywords grouped by language code.
	pub(crate) keywords: BTreeMap<String, Vec<String>>,
}

/// Elements stripped before any text is read.
pub(crate) fn excluded_selector() -> &'static Selector {
	&EXCLUDED
}

/// Main-content candidates, in priority order.
pub(crate) fn content_selectors() -> &'static [Selector] {
	&CONTENT_SELECTORS
}

/// Lowercased importance keywords across all languages.
pub(crate) fn keywords() -> &'static [String] {
	&KEYWORDS
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn patterns_load() {
		assert!(!PATTERNS.exclude.is_empty());
		assert_eq!(content_selectors().len(), PATTERNS.content_selectors.len());
		assert!(PATTERNS.keywords.len() >= 2, "keyword list should be bilingual");
		assert!(keywords().iter().any(|k| k == "important"));
	}

	#[test]
	fn exclusion_selector_covers_ad_markers() {
		use crate::dom::Document;

		let doc = Document::parse("<body><div id='ad' class='ad-slot'></div><section id='side' class='sidebar'></section><article id='story'></article></body>");
		let id = |name| doc.get_element_by_id(name).unwrap();
		assert!(doc.matches(id("ad"), excluded_selector()));
		assert!(doc.matches(id("side"), excluded_selector()));
		assert!(!doc.matches(id("story"), excluded_selector()));
	}
}
