//! Content-script entry point for the browser extension.
//!
//! The extension's content script hands the page HTML to [`PageLens`] and
//! forwards every runtime message to [`PageLens::handle_message`]; replies
//! are plain JSON-compatible objects.

use std::time::Duration;

use pagelens::{Clock, ContentScript, Document};
use pagelens_protocol::Response;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
	console_error_panic_hook::set_once();
}

/// Milliseconds from `Date.now()`, offset from when the page was loaded.
#[derive(Debug)]
struct DateClock {
	origin_ms: f64,
}

impl DateClock {
	fn new() -> Self {
		Self {
			origin_ms: js_sys::Date::now(),
		}
	}
}

impl Clock for DateClock {
	fn now(&self) -> Duration {
		Duration::from_secs_f64((js_sys::Date::now() - self.origin_ms).max(0.0) / 1000.0)
	}
}

#[wasm_bindgen]
pub struct PageLens {
	script: ContentScript,
}

#[wasm_bindgen]
impl PageLens {
	#[wasm_bindgen(constructor)]
	pub fn new(html: &str, url: &str) -> PageLens {
		PageLens {
			script: ContentScript::with_clock(Document::parse(html), url, Box::new(DateClock::new())),
		}
	}

	/// Returns `false` when already initialized.
	pub fn init(&mut self) -> bool {
		self.script.init()
	}

	#[wasm_bindgen(js_name = isInitialized)]
	pub fn is_initialized(&self) -> bool {
		self.script.is_initialized()
	}

	/// Handles a message object such as `{ action: "searchInPage", query: "rust" }`.
	#[wasm_bindgen(js_name = handleMessage)]
	pub fn handle_message(&mut self, message: JsValue) -> Result<JsValue, JsValue> {
		let raw: String = js_sys::JSON::stringify(&message)?.into();
		let response = self.script.handle_json(&raw);
		if let Some(error) = &response.error {
			web_sys::console::warn_1(&format!("pagelens: {} {}", error.code, error.message).into());
		}
		to_js(&response)
	}

	/// Same as [`PageLens::handle_message`] with JSON text in and out.
	#[wasm_bindgen(js_name = handleJson)]
	pub fn handle_json(&mut self, raw: &str) -> String {
		reply_json(&mut self.script, raw)
	}

	/// Dismisses the summary popup once it has timed out.
	pub fn tick(&mut self) -> bool {
		let now = self.script.now();
		self.script.tick(now)
	}

	#[wasm_bindgen(js_name = summaryVisible)]
	pub fn summary_visible(&self) -> bool {
		self.script.summary_visible()
	}

	/// Serialized page, including highlights and popup.
	pub fn html(&self) -> String {
		self.script.document().to_html()
	}
}

fn reply_json(script: &mut ContentScript, raw: &str) -> String {
	let response: Response = script.handle_json(raw);
	serde_json::to_string(&response)
		.unwrap_or_else(|_| r#"{"success":false,"error":{"code":"INTERNAL_ERROR","message":"unserializable response"}}"#.to_string())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
	// Plain objects rather than `Map`s, so metadata reads like any other field.
	value.serialize(&serde_wasm_bindgen::Serializer::json_compatible()).map_err(Into::into)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reply_json_follows_handshake() {
		let mut script = ContentScript::from_html("<body><p>Hello there, this page is ready to be read.</p></body>", "https://example.com");
		let before: serde_json::Value = serde_json::from_str(&reply_json(&mut script, r#"{"action":"ping"}"#)).unwrap();
		assert_eq!(before["error"]["code"], "NOT_READY");

		script.init();
		let after: serde_json::Value = serde_json::from_str(&reply_json(&mut script, r#"{"action":"ping"}"#)).unwrap();
		assert_eq!(after["success"], true);
		assert_eq!(after["data"]["kind"], "ready");
	}
}
