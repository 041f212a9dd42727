//! Host side of the message bus.
//!
//! A [`ContentBridge`] owns the page's [`ContentScript`] and talks to it only
//! through JSON-encoded messages, the same copies that would cross between
//! extension contexts. Before the first request it runs the readiness
//! handshake: `ping`, inject (initialize) on `NOT_READY`, ping again, for a
//! bounded number of attempts.

use pagelens::{ContentScript, Document};
use pagelens_protocol::{ErrorCode as ContentErrorCode, PROTOCOL_VERSION, Request, Response, ResponseData};
use tracing::{debug, info};

use crate::error::{LensError, Result};
use crate::source::LoadedPage;

/// Handshake attempts before the page is reported unavailable.
pub const HANDSHAKE_ATTEMPTS: u32 = 3;

#[derive(Debug)]
pub struct ContentBridge {
	script: ContentScript,
	handshake_attempts: u32,
	ready: bool,
}

impl ContentBridge {
	pub fn new(script: ContentScript) -> Self {
		Self {
			script,
			handshake_attempts: HANDSHAKE_ATTEMPTS,
			ready: false,
		}
	}

	pub fn from_page(page: &LoadedPage) -> Self {
		Self::new(ContentScript::from_html(&page.html, page.url.as_str()))
	}

	pub fn with_handshake_attempts(mut self, attempts: u32) -> Self {
		self.handshake_attempts = attempts;
		self
	}

	pub fn document(&self) -> &Document {
		self.script.document()
	}

	/// Pings the content script until it reports ready, initializing it when
	/// it answers `NOT_READY`.
	pub fn ensure_ready(&mut self) -> Result<()> {
		if self.ready {
			return Ok(());
		}
		for attempt in 1..=self.handshake_attempts {
			let response = self.exchange(&Request::Ping)?;
			match (response.data, response.error) {
				(Some(ResponseData::Ready { protocol_version }), _) if protocol_version == PROTOCOL_VERSION => {
					debug!(target = "pagelens", attempt, "content script ready");
					self.ready = true;
					return Ok(());
				}
				(Some(ResponseData::Ready { protocol_version }), _) => {
					return Err(LensError::Content {
						code: ContentErrorCode::InternalError,
						message: format!("content script speaks protocol {protocol_version}, expected {PROTOCOL_VERSION}"),
					});
				}
				(_, Some(error)) if error.code == ContentErrorCode::NotReady => {
					info!(target = "pagelens", attempt, "content script not ready, injecting");
					self.script.init();
				}
				(_, Some(error)) => {
					return Err(LensError::Content {
						code: error.code,
						message: error.message,
					});
				}
				(_, None) => {
					return Err(LensError::Content {
						code: ContentErrorCode::InternalError,
						message: "unexpected reply to ping".into(),
					});
				}
			}
		}
		Err(LensError::Handshake {
			attempts: self.handshake_attempts,
		})
	}

	/// Sends `request` and returns its payload, turning failure replies into
	/// [`LensError::Content`].
	pub fn request(&mut self, request: Request) -> Result<ResponseData> {
		self.ensure_ready()?;
		let response = self.exchange(&request)?;
		into_data(response)
	}

	/// Forwards a raw JSON message and returns the reply unchanged.
	pub fn send_raw(&mut self, raw: &str) -> Result<Response> {
		self.ensure_ready()?;
		Ok(self.script.handle_json(raw))
	}

	fn exchange(&mut self, request: &Request) -> Result<Response> {
		let message = serde_json::to_string(request)?;
		let reply = serde_json::to_string(&self.script.handle_json(&message))?;
		Ok(serde_json::from_str(&reply)?)
	}
}

fn into_data(response: Response) -> Result<ResponseData> {
	match (response.data, response.error) {
		(Some(data), None) if response.success => Ok(data),
		(_, Some(error)) => Err(LensError::Content {
			code: error.code,
			message: error.message,
		}),
		_ => Err(LensError::Content {
			code: ContentErrorCode::InternalError,
			message: "reply carried no data".into(),
		}),
	}
}
