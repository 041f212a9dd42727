//! Structured metadata collection: images, links, headings and meta tags.

use std::collections::BTreeMap;

use pagelens_protocol::{HeadingInfo, ImageInfo, LinkInfo};

use crate::dom::{Document, Element, NodeId};

pub(crate) fn collect_images(doc: &Document) -> Vec<ImageInfo> {
	elements(doc, "img")
		.filter_map(|(_, el)| {
			let src = el.attr("src")?;
			Some(ImageInfo {
				src: src.to_string(),
				alt: attr_or_empty(el, "alt"),
				title: attr_or_empty(el, "title"),
			})
		})
		.collect()
}

pub(crate) fn collect_links(doc: &Document) -> Vec<LinkInfo> {
	elements(doc, "a")
		.filter_map(|(node, el)| {
			let href = el.attr("href")?;
			Some(LinkInfo {
				href: href.to_string(),
				text: squash(&doc.text_content(node)),
				title: attr_or_empty(el, "title"),
			})
		})
		.collect()
}

pub(crate) fn collect_headings(doc: &Document) -> Vec<HeadingInfo> {
	doc.descendants(doc.root())
		.filter_map(|node| {
			let el = doc.element(node)?;
			let level = heading_level(el.name())?;
			Some(HeadingInfo {
				level,
				text: squash(&doc.text_content(node)),
				id: attr_or_empty(el, "id"),
			})
		})
		.collect()
}

/// `meta` tags keyed by `name`, else `property`. Later tags overwrite earlier ones.
pub(crate) fn collect_meta(doc: &Document) -> BTreeMap<String, String> {
	let mut metadata = BTreeMap::new();
	for (_, el) in elements(doc, "meta") {
		let Some(key) = el.attr("name").or_else(|| el.attr("property")) else {
			continue;
		};
		if key.is_empty() {
			continue;
		}
		metadata.insert(key.to_string(), attr_or_empty(el, "content"));
	}
	metadata
}

fn elements<'a>(doc: &'a Document, name: &'a str) -> impl Iterator<Item = (NodeId, &'a Element)> + 'a {
	doc.descendants(doc.root())
		.filter_map(move |node| doc.element(node).filter(|el| el.name() == name).map(|el| (node, el)))
}

fn heading_level(name: &str) -> Option<u8> {
	match name {
		"h1" => Some(1),
		"h2" => Some(2),
		"h3" => Some(3),
		"h4" => Some(4),
		"h5" => Some(5),
		"h6" => Some(6),
		_ => None,
	}
}

fn attr_or_empty(el: &Element, name: &str) -> String {
	el.attr(name).unwrap_or_default().to_string()
}

fn squash(text: &str) -> String {
	text.split_whitespace().collect::<Vec<_>>().join(" ")
}
