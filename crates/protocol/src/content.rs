//! Page snapshot types produced by extraction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Structured, normalized snapshot of a page's readable content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
	pub title: String,
	pub url: String,
	/// Normalized plain text, capped at the extraction length limit.
	pub text: String,
	#[serde(default)]
	pub images: Vec<ImageInfo>,
	#[serde(default)]
	pub links: Vec<LinkInfo>,
	#[serde(default)]
	pub headings: Vec<HeadingInfo>,
	/// `meta` tags keyed by `name` or `property`.
	#[serde(default)]
	pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
	pub src: String,
	pub alt: String,
	pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkInfo {
	pub href: String,
	pub text: String,
	pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingInfo {
	/// Heading rank, 1 through 6.
	pub level: u8,
	pub text: String,
	pub id: String,
}

/// A sentence that matched a search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
	pub text: String,
	pub occurrences: usize,
}

/// Local search results plus the context a host needs to build a prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
	pub query: String,
	pub title: String,
	pub url: String,
	pub total_matches: usize,
	pub matches: Vec<SearchMatch>,
	/// Leading slice of the page text.
	pub excerpt: String,
}
