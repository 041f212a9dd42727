//! Error types for message handling.

use pagelens_protocol::{ErrorCode, Response};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("Unknown action: {0}")]
	UnknownAction(String),

	#[error("Invalid request: {0}")]
	InvalidRequest(String),

	#[error("Content script is not initialized on this page")]
	NotReady,
}

impl Error {
	pub fn code(&self) -> ErrorCode {
		match self {
			Error::UnknownAction(_) => ErrorCode::UnknownAction,
			Error::InvalidRequest(_) => ErrorCode::InvalidRequest,
			Error::NotReady => ErrorCode::NotReady,
		}
	}
}

impl From<Error> for Response {
	fn from(err: Error) -> Self {
		Response::failure(err.code(), err.to_string())
	}
}
