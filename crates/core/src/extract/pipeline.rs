//! Orchestration for extraction stages.

use pagelens_protocol::PageContent;
use tracing::debug;

use crate::dom::Document;
use crate::extract::cleaner::{main_content_root, read_text, remove_clutter};
use crate::extract::metadata::{collect_headings, collect_images, collect_links, collect_meta};
use crate::extract::normalize::{normalize_text, truncate_chars};

/// Upper bound on the extracted `text`, in characters.
pub const MAX_TEXT_LENGTH: usize = 15_000;

/// Produces a [`PageContent`] snapshot of `doc`.
///
/// Non-content elements (scripts, styles, navigation, headers, footers,
/// asides, ad and sidebar markers) are detached from `doc` first; that
/// mutation is permanent for this document. Never fails: a page without
/// content yields empty fields.
pub fn extract_page_content(doc: &mut Document, url: &str) -> PageContent {
	let removed = remove_clutter(doc);
	let root = main_content_root(doc);
	let raw = read_text(doc, root);
	let text = truncate_chars(normalize_text(&raw), MAX_TEXT_LENGTH);

	let content = PageContent {
		title: doc.title(),
		url: url.to_string(),
		text,
		images: collect_images(doc),
		links: collect_links(doc),
		headings: collect_headings(doc),
		metadata: collect_meta(doc),
	};

	debug!(
		target = "pagelens",
		removed,
		chars = content.text.chars().count(),
		images = content.images.len(),
		links = content.links.len(),
		headings = content.headings.len(),
		"extracted page content"
	);
	content
}
