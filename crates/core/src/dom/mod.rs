//! Owned, mutable document tree.
//!
//! A page is held as a parsed [`scraper::Html`] whose `ego_tree` is edited
//! in place. Detaching a node unlinks it from its parent but keeps it in
//! the tree's storage, so stale ids stay valid to read while being
//! unreachable from [`Document::root`].
//!
//! Every walk goes through `ego_tree`'s iterators, never through recursion,
//! so nesting depth is bounded only by memory.

mod text;

use ego_tree::NodeRef;
use html5ever::{Attribute, LocalName, Namespace, QualName};
use scraper::node::Text;
use scraper::{CaseSensitivity, ElementRef, Html, Node};

pub use ego_tree::NodeId;
pub use scraper::Selector;
pub use scraper::node::Element;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// HTML document that can be read, queried and mutated.
#[derive(Debug, Clone)]
pub struct Document {
	html: Html,
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

impl Document {
	/// Creates an empty document holding only the root node.
	pub fn new() -> Self {
		Self { html: Html::new_document() }
	}

	/// Parses an HTML document. Malformed markup is repaired the way browsers do.
	pub fn parse(html: &str) -> Self {
		Self {
			html: Html::parse_document(html),
		}
	}

	pub fn root(&self) -> NodeId {
		self.html.tree.root().id()
	}

	fn node(&self, id: NodeId) -> Option<NodeRef<'_, Node>> {
		self.html.tree.get(id)
	}

	pub fn element(&self, id: NodeId) -> Option<&Element> {
		self.node(id)?.value().as_element()
	}

	pub fn text(&self, id: NodeId) -> Option<&str> {
		self.node(id)?.value().as_text().map(|text| &**text)
	}

	/// True when `id` is an element with the given tag name.
	pub fn is_element(&self, id: NodeId, name: &str) -> bool {
		self.element(id).is_some_and(|el| el.name() == name)
	}

	/// True when `id` is an element whose class list contains `class`.
	pub fn has_class(&self, id: NodeId, class: &str) -> bool {
		self.element(id).is_some_and(|el| el.has_class(class, CaseSensitivity::CaseSensitive))
	}

	pub fn parent(&self, id: NodeId) -> Option<NodeId> {
		self.node(id)?.parent().map(|parent| parent.id())
	}

	pub fn children(&self, id: NodeId) -> Vec<NodeId> {
		self.node(id).map(|node| node.children().map(|child| child.id()).collect()).unwrap_or_default()
	}

	/// Nodes below `id` in document order, excluding `id` itself.
	pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
		self.node(id).into_iter().flat_map(|node| node.descendants().skip(1)).map(|node| node.id())
	}

	/// Ancestors of `id`, nearest first.
	pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
		self.node(id).into_iter().flat_map(|node| node.ancestors()).map(|node| node.id())
	}

	/// True when `id` is reachable from the root.
	pub fn is_attached(&self, id: NodeId) -> bool {
		let root = self.root();
		id == root || self.ancestors(id).any(|node| node == root)
	}

	/// The `<html>` element, if any.
	pub fn document_element(&self) -> Option<NodeId> {
		self.children(self.root()).into_iter().find(|&child| self.element(child).is_some())
	}

	pub fn body(&self) -> Option<NodeId> {
		self.first_element_named("body")
	}

	/// Trimmed text of the first `<title>` element, or an empty string.
	pub fn title(&self) -> String {
		self.first_element_named("title")
			.map(|title| self.text_content(title).split_whitespace().collect::<Vec<_>>().join(" "))
			.unwrap_or_default()
	}

	pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
		self.descendants(self.root()).find(|&node| self.element(node).and_then(Element::id) == Some(id))
	}

	/// Attached elements carrying `class`, in document order.
	pub fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
		self.descendants(self.root()).filter(|&node| self.has_class(node, class)).collect()
	}

	/// All attached elements matching `selector`, in document order.
	///
	/// Unlike [`Html::select`], nodes detached earlier are never returned.
	pub fn select_all(&self, selector: &Selector) -> Vec<NodeId> {
		self.descendants(self.root()).filter(|&node| self.matches(node, selector)).collect()
	}

	pub fn select_first(&self, selector: &Selector) -> Option<NodeId> {
		self.descendants(self.root()).find(|&node| self.matches(node, selector))
	}

	pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
		self.node(id).and_then(ElementRef::wrap).is_some_and(|el| selector.matches(&el))
	}

	/// Concatenated text of every descendant text node.
	pub fn text_content(&self, id: NodeId) -> String {
		if let Some(text) = self.text(id) {
			return text.to_string();
		}
		self.descendants(id).filter_map(|node| self.text(node)).collect()
	}

	/// Serializes the attached document.
	pub fn to_html(&self) -> String {
		self.html.html()
	}

	/// Creates a detached HTML element.
	pub fn create_element(&mut self, name: &str, attrs: Vec<(String, String)>) -> NodeId {
		let attrs = attrs
			.into_iter()
			.map(|(name, value)| Attribute {
				name: QualName::new(None, Namespace::from(""), LocalName::from(name.to_ascii_lowercase())),
				value: value.into(),
			})
			.collect();
		let name = QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(name.to_ascii_lowercase()));
		self.html.tree.orphan(Node::Element(Element::new(name, attrs))).id()
	}

	/// Creates a detached text node.
	pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
		let text: String = text.into();
		self.html.tree.orphan(Node::Text(Text { text: text.into() })).id()
	}

	/// Appends `child` as the last child of `parent`, moving it if attached elsewhere.
	pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
		if parent == child {
			return;
		}
		if let Some(mut node) = self.html.tree.get_mut(parent) {
			node.append_id(child);
		}
	}

	/// Inserts `node` immediately before `reference`. No-op when `reference` has no parent.
	pub fn insert_before(&mut self, reference: NodeId, node: NodeId) {
		if node == reference {
			return;
		}
		// Unlink first so `reference`'s sibling links are current when read.
		self.detach(node);
		if self.parent(reference).is_none() {
			return;
		}
		if let Some(mut anchor) = self.html.tree.get_mut(reference) {
			anchor.insert_id_before(node);
		}
	}

	/// Unlinks `id` from its parent. The subtree stays intact but unreachable.
	pub fn detach(&mut self, id: NodeId) {
		if let Some(mut node) = self.html.tree.get_mut(id) {
			node.detach();
		}
	}

	/// Replaces `id` with `replacements`, in order, at the same position.
	pub fn replace_with(&mut self, id: NodeId, replacements: &[NodeId]) {
		for &node in replacements {
			self.insert_before(id, node);
		}
		self.detach(id);
	}

	/// Merges adjacent text nodes and drops empty ones at and below `id`.
	pub fn normalize(&mut self, id: NodeId) {
		let mut parents = vec![id];
		parents.extend(self.descendants(id).filter(|&node| self.element(node).is_some()));

		for parent in parents {
			let mut run: Option<NodeId> = None;
			for child in self.children(parent) {
				let Some(text) = self.text(child) else {
					run = None;
					continue;
				};
				if text.is_empty() {
					self.detach(child);
					continue;
				}
				match run {
					Some(head) => {
						let tail = text.to_string();
						self.push_text(head, &tail);
						self.detach(child);
					}
					None => run = Some(child),
				}
			}
		}
	}

	fn push_text(&mut self, id: NodeId, tail: &str) {
		if let Some(mut node) = self.html.tree.get_mut(id) {
			if let Node::Text(text) = node.value() {
				text.text.push_slice(tail);
			}
		}
	}

	fn first_element_named(&self, name: &str) -> Option<NodeId> {
		self.descendants(self.root()).find(|&node| self.is_element(node, name))
	}
}
