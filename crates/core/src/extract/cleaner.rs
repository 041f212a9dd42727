//! Clutter removal and main-content selection.

use tracing::debug;

use crate::dom::{Document, NodeId};
use crate::patterns::{content_selectors, excluded_selector};

/// Detaches every element matching the exclusion patterns. Returns how many
/// subtrees were removed.
pub(crate) fn remove_clutter(doc: &mut Document) -> usize {
	let matches = doc.select_all(excluded_selector());
	let mut removed = 0;
	for node in matches {
		// Nested matches are already gone with their ancestor.
		if doc.is_attached(node) {
			doc.detach(node);
			removed += 1;
		}
	}
	removed
}

/// First element matching a content selector, else `<body>`, else the
/// document root. Selectors are tried in priority order and a match wins
/// even when it holds no text.
pub(crate) fn main_content_root(doc: &Document) -> NodeId {
	for (index, selector) in content_selectors().iter().enumerate() {
		if let Some(node) = doc.select_first(selector) {
			debug!(target = "pagelens", selector_index = index, "main content selector matched");
			return node;
		}
	}
	doc.body().unwrap_or_else(|| doc.root())
}

/// Reads text under `root`, preferring rendered text, then raw text content,
/// then a space-joined walk over text nodes.
pub(crate) fn read_text(doc: &Document, root: NodeId) -> String {
	if let Some(text) = doc.inner_text(root) {
		return text;
	}
	if doc.element(root).is_some() {
		return doc.text_content(root);
	}
	doc.descendants(root).filter_map(|node| doc.text(node)).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn removes_scripts_and_navigation() {
		let mut doc = Document::parse("<body><nav>Menu</nav><div>Before<script>alert('x');</script>After</div><footer>Foot</footer></body>");
		let removed = remove_clutter(&mut doc);
		assert_eq!(removed, 3);
		let text = doc.text_content(doc.root());
		assert!(!text.contains("alert"));
		assert!(!text.contains("Menu"));
		assert!(text.contains("Before"));
		assert!(text.contains("After"));
	}

	#[test]
	fn nested_matches_count_once() {
		let mut doc = Document::parse("<body><aside class='sidebar'><div class='ads'>Buy</div></aside><p>Keep</p></body>");
		assert_eq!(remove_clutter(&mut doc), 1);
		assert_eq!(doc.text_content(doc.body().unwrap()), "Keep");
	}

	#[test]
	fn prefers_content_selectors_in_order() {
		let doc = Document::parse("<body><div class='post'>post</div><article>article</article></body>");
		let root = main_content_root(&doc);
		assert!(doc.is_element(root, "article"));
	}

	#[test]
	fn first_matching_region_wins_even_when_empty() {
		let doc = Document::parse("<body><div class='content'>Real words</div><main id='shell'></main></body>");
		let root = main_content_root(&doc);
		assert_eq!(doc.get_element_by_id("shell"), Some(root));
		assert_eq!(read_text(&doc, root), "");
	}

	#[test]
	fn falls_back_to_body() {
		let doc = Document::parse("<body><div>plain</div></body>");
		assert_eq!(main_content_root(&doc), doc.body().unwrap());
	}

	#[test]
	fn hidden_root_falls_back_to_text_content() {
		let doc = Document::parse("<body><main hidden>Hidden main text</main></body>");
		let root = main_content_root(&doc);
		assert_eq!(read_text(&doc, root), "Hidden main text");
	}

	#[test]
	fn document_root_joins_text_nodes() {
		let mut doc = Document::new();
		let root = doc.root();
		for word in ["alpha", "beta"] {
			let node = doc.create_text(word);
			doc.append_child(root, node);
		}
		assert_eq!(read_text(&doc, root), "alpha beta");
	}
}
