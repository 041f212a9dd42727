//! Local in-page search over extracted text.

use pagelens_protocol::{PageContent, SearchMatch, SearchResults};

use crate::error::{Error, Result};
use crate::extract::truncate_chars;
use crate::rank::split_sentences;

/// Maximum number of matching sentences returned.
pub const MAX_SEARCH_MATCHES: usize = 10;
/// Length of the page excerpt attached to results, in characters.
pub const EXCERPT_CHARS: usize = 3_000;

/// Sentences of `content.text` containing every term of `query`.
///
/// Matching is case-insensitive. Results are ordered by total term
/// occurrences, ties keeping document order.
pub fn search_content(content: &PageContent, query: &str) -> Result<SearchResults> {
	let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
	if terms.is_empty() {
		return Err(Error::InvalidRequest("search query is empty".into()));
	}

	let mut matches: Vec<SearchMatch> = split_sentences(&content.text)
		.filter_map(|sentence| {
			let lower = sentence.to_lowercase();
			let mut occurrences = 0;
			for term in &terms {
				let count = lower.matches(term.as_str()).count();
				if count == 0 {
					return None;
				}
				occurrences += count;
			}
			Some(SearchMatch {
				text: sentence.to_string(),
				occurrences,
			})
		})
		.collect();

	matches.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));
	let total_matches = matches.len();
	matches.truncate(MAX_SEARCH_MATCHES);

	Ok(SearchResults {
		query: query.trim().to_string(),
		title: content.title.clone(),
		url: content.url.clone(),
		total_matches,
		matches,
		excerpt: truncate_chars(content.text.clone(), EXCERPT_CHARS),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn page(text: &str) -> PageContent {
		PageContent {
			title: "Doc".into(),
			url: "https://example.com".into(),
			text: text.into(),
			..Default::default()
		}
	}

	#[test]
	fn requires_every_term() {
		let content = page("Rust has ownership. Ownership in Rust is checked. Go has a GC.");
		let results = search_content(&content, "rust OWNERSHIP").unwrap();
		assert_eq!(results.total_matches, 2);
		assert_eq!(results.matches[0].text, "Rust has ownership");
		assert_eq!(results.title, "Doc");
	}

	#[test]
	fn orders_by_occurrences() {
		let content = page("Cache once. Cache twice, cache. Nothing here.");
		let results = search_content(&content, "cache").unwrap();
		assert_eq!(results.matches[0].occurrences, 2);
		assert_eq!(results.matches[1].text, "Cache once");
	}

	#[test]
	fn caps_results_and_keeps_total() {
		let text = (0..15).map(|i| format!("match {i}")).collect::<Vec<_>>().join(". ");
		let results = search_content(&page(&text), "match").unwrap();
		assert_eq!(results.matches.len(), MAX_SEARCH_MATCHES);
		assert_eq!(results.total_matches, 15);
	}

	#[test]
	fn empty_query_is_rejected() {
		let err = search_content(&page("text"), "   ").unwrap_err();
		assert!(matches!(err, Error::InvalidRequest(_)));
	}
}
