use std::path::PathBuf;

use pagelens_protocol::ErrorCode as ContentErrorCode;
use thiserror::Error;

use crate::generate::GenerateError;
use crate::output::ErrorCode;

pub type Result<T> = std::result::Result<T, LensError>;

#[derive(Debug, Error)]
pub enum LensError {
	#[error("Failed to fetch {url}: {message}")]
	Fetch { url: String, message: String },

	#[error("Failed to read {path}: {source}")]
	ReadSource {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Content script failed [{code}]: {message}")]
	Content { code: ContentErrorCode, message: String },

	#[error("Content script did not become ready after {attempts} attempts")]
	Handshake { attempts: u32 },

	#[error(transparent)]
	Generate(#[from] GenerateError),

	#[error("Invalid settings file {path}: {message}")]
	Settings { path: PathBuf, message: String },

	#[error("Invalid input: {0}")]
	InvalidInput(String),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("HTTP client error: {0}")]
	Http(#[from] reqwest::Error),
}

impl LensError {
	pub fn code(&self) -> ErrorCode {
		match self {
			LensError::Fetch { .. } => ErrorCode::FetchFailed,
			LensError::ReadSource { .. } | LensError::Io(_) => ErrorCode::IoError,
			LensError::Content { code, .. } => match code {
				ContentErrorCode::InvalidRequest | ContentErrorCode::UnknownAction => ErrorCode::InvalidInput,
				ContentErrorCode::NotReady => ErrorCode::ContentUnavailable,
				ContentErrorCode::InternalError => ErrorCode::InternalError,
			},
			LensError::Handshake { .. } => ErrorCode::ContentUnavailable,
			LensError::Generate(GenerateError::MissingApiKey) => ErrorCode::MissingApiKey,
			LensError::Generate(_) => ErrorCode::GenerationFailed,
			LensError::Settings { .. } => ErrorCode::SettingsError,
			LensError::InvalidInput(_) | LensError::Json(_) => ErrorCode::InvalidInput,
			LensError::Http(_) => ErrorCode::InternalError,
		}
	}

	/// Text shown to the user for this failure.
	///
	/// Content-side failures never reach the user verbatim; they are turned
	/// into an instruction the user can act on.
	pub fn user_message(&self) -> String {
		match self {
			LensError::Handshake { .. }
			| LensError::Content {
				code: ContentErrorCode::NotReady | ContentErrorCode::InternalError,
				..
			} => "Page content is not available. Refresh the page and retry.".to_string(),
			LensError::Generate(GenerateError::MissingApiKey) => {
				"No API key configured. Run `pagelens settings set apiKey <KEY>` or set PAGELENS_API_KEY.".to_string()
			}
			other => other.to_string(),
		}
	}
}
