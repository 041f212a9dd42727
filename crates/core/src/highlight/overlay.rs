//! Transient summary popup listing the highlighted sentences.

use std::time::Duration;

use crate::dom::{Document, NodeId};

/// Element id of the popup; at most one element carries it.
pub const OVERLAY_ID: &str = "pagelens-summary-popup";
/// Class of the popup's close control.
pub const OVERLAY_CLOSE_CLASS: &str = "pagelens-summary-close";
/// How long the popup stays up without user interaction.
pub const OVERLAY_TIMEOUT: Duration = Duration::from_secs(10);

const OVERLAY_STYLE: &str = "position:fixed;top:20px;right:20px;z-index:2147483647;max-width:360px";

/// Handle to a popup inserted by [`show_summary`].
///
/// Times are offsets on the owning page's [`Clock`](crate::Clock).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOverlay {
	pub node: NodeId,
	pub expires_at: Duration,
}

impl SummaryOverlay {
	pub fn is_expired(&self, now: Duration) -> bool {
		now >= self.expires_at
	}
}

/// Replaces any existing popup with one listing `sentences`.
///
/// The popup is appended to `<body>`, or to the document element when the
/// page has no body. Returns `None` only for a document with no element at all.
pub fn show_summary(doc: &mut Document, sentences: &[String], now: Duration) -> Option<SummaryOverlay> {
	dismiss_summary(doc);
	let host = doc.body().or_else(|| doc.document_element())?;

	let popup = doc.create_element(
		"div",
		vec![
			("id".to_string(), OVERLAY_ID.to_string()),
			("role".to_string(), "dialog".to_string()),
			("style".to_string(), OVERLAY_STYLE.to_string()),
		],
	);

	let close = doc.create_element(
		"button",
		vec![
			("class".to_string(), OVERLAY_CLOSE_CLASS.to_string()),
			("aria-label".to_string(), "Close".to_string()),
		],
	);
	let close_label = doc.create_text("\u{d7}");
	doc.append_child(close, close_label);
	doc.append_child(popup, close);

	let heading = doc.create_element("h3", Vec::new());
	let heading_text = doc.create_text(format!("Key points ({})", sentences.len()));
	doc.append_child(heading, heading_text);
	doc.append_child(popup, heading);

	let list = doc.create_element("ol", Vec::new());
	for sentence in sentences {
		let item = doc.create_element("li", Vec::new());
		let text = doc.create_text(sentence.as_str());
		doc.append_child(item, text);
		doc.append_child(list, item);
	}
	doc.append_child(popup, list);
	doc.append_child(host, popup);

	Some(SummaryOverlay {
		node: popup,
		expires_at: now + OVERLAY_TIMEOUT,
	})
}

/// Removes the popup if present. Returns whether one was removed.
pub fn dismiss_summary(doc: &mut Document) -> bool {
	let Some(popup) = doc.get_element_by_id(OVERLAY_ID) else {
		return false;
	};
	doc.detach(popup);
	true
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn at_most_one_popup_exists() {
		let mut doc = Document::parse("<body><p>x</p></body>");
		let now = Duration::ZERO;
		let first = show_summary(&mut doc, &["One".to_string()], now).unwrap();
		let second = show_summary(&mut doc, &["Two".to_string(), "Three".to_string()], now).unwrap();

		assert!(!doc.is_attached(first.node));
		assert!(doc.is_attached(second.node));
		let popups = doc.descendants(doc.root()).filter(|&n| doc.element(n).and_then(|el| el.id()) == Some(OVERLAY_ID)).count();
		assert_eq!(popups, 1);
		assert!(doc.text_content(second.node).contains("Key points (2)"));
	}

	#[test]
	fn expires_after_timeout() {
		let mut doc = Document::parse("<body></body>");
		let now = Duration::from_secs(3);
		let overlay = show_summary(&mut doc, &[], now).unwrap();
		assert!(!overlay.is_expired(now + Duration::from_secs(9)));
		assert_eq!(overlay.expires_at, Duration::from_secs(13));
		assert!(overlay.is_expired(now + OVERLAY_TIMEOUT));
	}

	#[test]
	fn dismiss_is_idempotent() {
		let mut doc = Document::parse("<body></body>");
		show_summary(&mut doc, &["A".to_string()], Duration::ZERO);
		assert!(dismiss_summary(&mut doc));
		assert!(!dismiss_summary(&mut doc));
	}
}
