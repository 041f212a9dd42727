//! Rendered-text approximation (`innerText`).

use ego_tree::iter::Edge;
use scraper::Node;

use super::{Document, Element, NodeId};

const NOT_RENDERED: &[&str] = &["head", "script", "style", "noscript", "template", "title", "meta", "link"];
const BLOCK_ELEMENTS: &[&str] = &[
	"address", "article", "aside", "blockquote", "dd", "details", "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2",
	"h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "summary", "table", "tr", "ul",
];

impl Document {
	/// Text as a reader would see it: block boundaries become line breaks and
	/// hidden subtrees are skipped.
	///
	/// Returns `None` when `id` is not an element or is itself not rendered.
	pub fn inner_text(&self, id: NodeId) -> Option<String> {
		if !is_rendered(self.element(id)?) {
			return None;
		}
		let mut out = String::new();
		// Root of the subtree being skipped, if any.
		let mut hidden: Option<NodeId> = None;
		let mut preformatted = 0usize;

		for edge in self.node(id)?.traverse() {
			match edge {
				Edge::Open(node) => {
					if hidden.is_some() || node.id() == id {
						continue;
					}
					match node.value() {
						Node::Text(text) if preformatted > 0 => out.push_str(text),
						Node::Text(text) => push_collapsed(text, &mut out),
						Node::Element(el) if !is_rendered(el) => hidden = Some(node.id()),
						Node::Element(el) => match el.name() {
							"br" => out.push('\n'),
							"pre" => {
								out.push('\n');
								preformatted += 1;
							}
							name if BLOCK_ELEMENTS.contains(&name) => out.push('\n'),
							_ => {}
						},
						_ => {}
					}
				}
				Edge::Close(node) => {
					if hidden == Some(node.id()) {
						hidden = None;
						continue;
					}
					if hidden.is_some() || node.id() == id {
						continue;
					}
					let Some(el) = node.value().as_element() else {
						continue;
					};
					match el.name() {
						"td" | "th" => out.push('\t'),
						"pre" => {
							out.push('\n');
							preformatted = preformatted.saturating_sub(1);
						}
						name if BLOCK_ELEMENTS.contains(&name) => out.push('\n'),
						_ => {}
					}
				}
			}
		}
		Some(out)
	}
}

fn is_rendered(el: &Element) -> bool {
	if NOT_RENDERED.contains(&el.name()) || el.attr("hidden").is_some() {
		return false;
	}
	!el.attr("style").is_some_and(|style| {
		let compact: String = style.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_ascii_lowercase();
		compact.contains("display:none") || compact.contains("visibility:hidden")
	})
}

fn push_collapsed(text: &str, out: &mut String) {
	let mut pending_space = text.starts_with(char::is_whitespace);
	for word in text.split_whitespace() {
		if pending_space && !out.is_empty() && !out.ends_with([' ', '\n', '\t']) {
			out.push(' ');
		}
		out.push_str(word);
		pending_space = true;
	}
	if text.ends_with(char::is_whitespace) && !text.trim().is_empty() {
		out.push(' ');
	}
}
