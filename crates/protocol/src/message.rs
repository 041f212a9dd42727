//! Request/response envelopes for the cross-context message bus.

use serde::{Deserialize, Serialize};

use crate::content::{PageContent, SearchResults};

/// Protocol revision reported by the readiness handshake.
pub const PROTOCOL_VERSION: u32 = 1;

/// Every action name the content script answers to.
pub const ACTIONS: &[&str] = &[
	"ping",
	"getPageContent",
	"highlightImportantContent",
	"removeHighlights",
	"searchInPage",
	"dismissSummary",
];

/// A request sent to the content script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
	/// Readiness handshake; answered with [`ResponseData::Ready`].
	Ping,
	GetPageContent,
	HighlightImportantContent,
	RemoveHighlights,
	SearchInPage { query: String },
	DismissSummary,
}

impl Request {
	pub fn action(&self) -> &'static str {
		match self {
			Request::Ping => "ping",
			Request::GetPageContent => "getPageContent",
			Request::HighlightImportantContent => "highlightImportantContent",
			Request::RemoveHighlights => "removeHighlights",
			Request::SearchInPage { .. } => "searchInPage",
			Request::DismissSummary => "dismissSummary",
		}
	}
}

/// The reply envelope for every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
	pub success: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<ResponseData>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<ErrorPayload>,
}

impl Response {
	pub fn success(data: ResponseData) -> Self {
		Self {
			success: true,
			data: Some(data),
			error: None,
		}
	}

	pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
		Self {
			success: false,
			data: None,
			error: Some(ErrorPayload {
				code,
				message: message.into(),
			}),
		}
	}
}

/// Typed payloads, one per action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ResponseData {
	#[serde(rename_all = "camelCase")]
	Ready { protocol_version: u32 },
	PageContent(PageContent),
	Highlighted { sentences: Vec<String>, highlighted: usize },
	HighlightsRemoved { removed: usize },
	SearchResults(SearchResults),
	SummaryDismissed { dismissed: bool },
}

/// Error information for failed requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
	pub code: ErrorCode,
	pub message: String,
}

/// Standardized error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
	UnknownAction,
	InvalidRequest,
	NotReady,
	InternalError,
}

impl std::fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ErrorCode::UnknownAction => write!(f, "UNKNOWN_ACTION"),
			ErrorCode::InvalidRequest => write!(f, "INVALID_REQUEST"),
			ErrorCode::NotReady => write!(f, "NOT_READY"),
			ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
		}
	}
}
