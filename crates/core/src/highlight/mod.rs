//! In-page highlighting of ranked sentences.
//!
//! Application runs in two phases: every `(text node, byte range)` match is
//! collected first against an unchanged tree, then each matched node is
//! spliced into `before` / marker / `after`. Nothing inserted during the
//! second phase is ever rescanned.
//!
//! Active highlights are exactly the elements carrying [`HIGHLIGHT_CLASS`],
//! which makes removal idempotent.

mod overlay;

use std::ops::Range;

use tracing::debug;

pub use overlay::{OVERLAY_CLOSE_CLASS, OVERLAY_ID, OVERLAY_TIMEOUT, SummaryOverlay, dismiss_summary, show_summary};

use crate::dom::{Document, NodeId};

/// Class carried by every highlight marker element.
pub const HIGHLIGHT_CLASS: &str = "pagelens-highlight";
const MARKER_TAG: &str = "span";

/// A run of text inside one text node that will be wrapped in a marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
	pub node: NodeId,
	/// Byte range of the match inside the node's text.
	pub range: Range<usize>,
}

/// Removes existing highlights, then marks the first occurrence of any of
/// `sentences` in each text node under `<body>`. Returns how many spans were
/// marked.
pub fn apply_highlights(doc: &mut Document, sentences: &[String]) -> usize {
	remove_highlights(doc);
	let spans = find_highlight_spans(doc, sentences);
	for span in &spans {
		wrap_span(doc, span);
	}
	debug!(target = "pagelens", sentences = sentences.len(), spans = spans.len(), "applied highlights");
	spans.len()
}

/// Collects highlight targets without touching the tree.
///
/// Text nodes directly inside `script`/`style`, whitespace-only nodes and
/// the summary overlay are skipped. For each node the first sentence in
/// ranked order that it contains wins.
pub fn find_highlight_spans(doc: &Document, sentences: &[String]) -> Vec<HighlightSpan> {
	let Some(body) = doc.body() else {
		return Vec::new();
	};
	let targets: Vec<&str> = sentences.iter().map(|s| s.trim()).filter(|s| !s.is_empty()).collect();
	if targets.is_empty() {
		return Vec::new();
	}

	doc.descendants(body)
		.filter(|&node| is_candidate(doc, node))
		.filter_map(|node| {
			let text = doc.text(node)?;
			targets.iter().find_map(|target| {
				text.find(target).map(|start| HighlightSpan {
					node,
					range: start..start + target.len(),
				})
			})
		})
		.collect()
}

/// Replaces every marker with its plain text and merges the split text back
/// together. Returns how many markers were removed.
pub fn remove_highlights(doc: &mut Document) -> usize {
	let markers = doc.elements_by_class(HIGHLIGHT_CLASS);
	let mut parents: Vec<NodeId> = Vec::new();
	let mut removed = 0;

	for marker in markers {
		if !doc.is_attached(marker) {
			continue;
		}
		let Some(parent) = doc.parent(marker) else {
			continue;
		};
		let text = doc.text_content(marker);
		let replacement = doc.create_text(text);
		doc.replace_with(marker, &[replacement]);
		if !parents.contains(&parent) {
			parents.push(parent);
		}
		removed += 1;
	}

	for parent in parents {
		doc.normalize(parent);
	}
	if removed > 0 {
		debug!(target = "pagelens", removed, "removed highlights");
	}
	removed
}

fn is_candidate(doc: &Document, node: NodeId) -> bool {
	let Some(text) = doc.text(node) else {
		return false;
	};
	if text.trim().is_empty() {
		return false;
	}
	if doc.parent(node).is_some_and(|parent| doc.is_element(parent, "script") || doc.is_element(parent, "style")) {
		return false;
	}
	!doc.ancestors(node).any(|ancestor| doc.element(ancestor).and_then(|el| el.id()) == Some(OVERLAY_ID))
}

fn wrap_span(doc: &mut Document, span: &HighlightSpan) {
	let Some(text) = doc.text(span.node).map(str::to_string) else {
		return;
	};
	let (before, rest) = text.split_at(span.range.start);
	let (matched, after) = rest.split_at(span.range.len());

	let mut parts = Vec::with_capacity(3);
	if !before.is_empty() {
		parts.push(doc.create_text(before));
	}
	let marker = doc.create_element(MARKER_TAG, vec![("class".to_string(), HIGHLIGHT_CLASS.to_string())]);
	let inner = doc.create_text(matched);
	doc.append_child(marker, inner);
	parts.push(marker);
	if !after.is_empty() {
		parts.push(doc.create_text(after));
	}

	doc.replace_with(span.node, &parts);
}
