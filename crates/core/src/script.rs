//! The content-script side of the message bus.
//!
//! A [`ContentScript`] owns the single document of one page context. Every
//! mutating operation takes `&mut self`, so exactly one actor can touch the
//! document at a time.

use std::time::Duration;

use pagelens_protocol::{ACTIONS, PROTOCOL_VERSION, Request, Response, ResponseData};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::dom::Document;
use crate::error::{Error, Result};
use crate::extract::extract_page_content;
use crate::highlight::{SummaryOverlay, apply_highlights, dismiss_summary, remove_highlights, show_summary};
use crate::rank::rank;
use crate::search::search_content;

/// Page-side request handler.
#[derive(Debug)]
pub struct ContentScript {
	document: Document,
	url: String,
	initialized: bool,
	summary: Option<SummaryOverlay>,
	clock: Box<dyn Clock>,
}

impl ContentScript {
	pub fn new(document: Document, url: impl Into<String>) -> Self {
		Self::with_clock(document, url, Box::new(SystemClock::new()))
	}

	/// Uses `clock` for popup timeouts, for hosts without `Instant`.
	pub fn with_clock(document: Document, url: impl Into<String>, clock: Box<dyn Clock>) -> Self {
		Self {
			document,
			url: url.into(),
			initialized: false,
			summary: None,
			clock,
		}
	}

	pub fn from_html(html: &str, url: impl Into<String>) -> Self {
		Self::new(Document::parse(html), url)
	}

	/// Marks the script ready to serve requests. Returns `false` when it
	/// already was, leaving all state untouched.
	pub fn init(&mut self) -> bool {
		if self.initialized {
			debug!(target = "pagelens", url = %self.url, "content script already initialized");
			return false;
		}
		self.initialized = true;
		info!(target = "pagelens", url = %self.url, "content script initialized");
		true
	}

	pub fn is_initialized(&self) -> bool {
		self.initialized
	}

	pub fn url(&self) -> &str {
		&self.url
	}

	pub fn document(&self) -> &Document {
		&self.document
	}

	/// True while a summary popup is attached to the page.
	pub fn summary_visible(&self) -> bool {
		self.summary.as_ref().is_some_and(|overlay| self.document.is_attached(overlay.node))
	}

	/// Dismisses the summary popup once its timeout has elapsed. Returns
	/// whether a popup was removed.
	pub fn tick(&mut self, now: Duration) -> bool {
		if !self.summary.as_ref().is_some_and(|overlay| overlay.is_expired(now)) {
			return false;
		}
		self.summary = None;
		let removed = dismiss_summary(&mut self.document);
		if removed {
			debug!(target = "pagelens", "summary popup timed out");
		}
		removed
	}

	pub fn handle(&mut self, request: Request) -> Response {
		let now = self.clock.now();
		self.handle_at(request, now)
	}

	/// Current time on this page's clock.
	pub fn now(&self) -> Duration {
		self.clock.now()
	}

	/// Decodes a raw JSON message and handles it.
	pub fn handle_json(&mut self, raw: &str) -> Response {
		match decode_request(raw) {
			Ok(request) => self.handle(request),
			Err(err) => {
				warn!(target = "pagelens", error = %err, "rejected message");
				err.into()
			}
		}
	}

	/// Handles `request` with `now` as the current time.
	pub fn handle_at(&mut self, request: Request, now: Duration) -> Response {
		let action = request.action();
		match self.dispatch(request, now) {
			Ok(data) => {
				debug!(target = "pagelens", action, "handled request");
				Response::success(data)
			}
			Err(err) => {
				warn!(target = "pagelens", action, error = %err, "request failed");
				err.into()
			}
		}
	}

	fn dispatch(&mut self, request: Request, now: Duration) -> Result<ResponseData> {
		if !self.initialized {
			return Err(Error::NotReady);
		}
		self.tick(now);

		match request {
			Request::Ping => Ok(ResponseData::Ready {
				protocol_version: PROTOCOL_VERSION,
			}),
			Request::GetPageContent => Ok(ResponseData::PageContent(extract_page_content(&mut self.document, &self.url))),
			Request::HighlightImportantContent => {
				// Drop the old popup first so its list items are never matched.
				dismiss_summary(&mut self.document);
				let content = extract_page_content(&mut self.document, &self.url);
				let sentences = rank(&content.text);
				let highlighted = apply_highlights(&mut self.document, &sentences);
				self.summary = show_summary(&mut self.document, &sentences, now);
				Ok(ResponseData::Highlighted { sentences, highlighted })
			}
			Request::RemoveHighlights => Ok(ResponseData::HighlightsRemoved {
				removed: remove_highlights(&mut self.document),
			}),
			Request::SearchInPage { query } => {
				// Searching reads a scratch copy and leaves the page as rendered.
				let mut scratch = self.document.clone();
				let content = extract_page_content(&mut scratch, &self.url);
				Ok(ResponseData::SearchResults(search_content(&content, &query)?))
			}
			Request::DismissSummary => {
				self.summary = None;
				Ok(ResponseData::SummaryDismissed {
					dismissed: dismiss_summary(&mut self.document),
				})
			}
		}
	}
}

/// Parses a message, telling unknown actions apart from malformed payloads.
pub fn decode_request(raw: &str) -> Result<Request> {
	let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| Error::InvalidRequest(e.to_string()))?;
	let Some(action) = value.get("action").and_then(|a| a.as_str()) else {
		return Err(Error::InvalidRequest("missing `action` field".into()));
	};
	if !ACTIONS.contains(&action) {
		return Err(Error::UnknownAction(action.to_string()));
	}
	serde_json::from_value(value).map_err(|e| Error::InvalidRequest(e.to_string()))
}
