use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Current schema version for command output.
pub const SCHEMA_VERSION: u32 = 1;

/// The result envelope returned by all commands.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult<T: Serialize> {
	pub schema_version: u32,
	pub ok: bool,
	pub command: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub inputs: Option<CommandInputs>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<CommandError>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub duration_ms: Option<u64>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub diagnostics: Vec<Diagnostic>,
}

/// Inputs used for a command execution.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CommandInputs {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub source: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub query: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub language: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub output_path: Option<PathBuf>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub key: Option<String>,
}

impl CommandInputs {
	pub fn source(source: impl Into<String>) -> Self {
		Self {
			source: Some(source.into()),
			..Default::default()
		}
	}
}

/// Error information for failed commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
	pub code: ErrorCode,
	pub message: String,
}

/// Standardized error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
	FetchFailed,
	ContentUnavailable,
	GenerationFailed,
	MissingApiKey,
	SettingsError,
	IoError,
	InvalidInput,
	InternalError,
}

impl std::fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ErrorCode::FetchFailed => write!(f, "FETCH_FAILED"),
			ErrorCode::ContentUnavailable => write!(f, "CONTENT_UNAVAILABLE"),
			ErrorCode::GenerationFailed => write!(f, "GENERATION_FAILED"),
			ErrorCode::MissingApiKey => write!(f, "MISSING_API_KEY"),
			ErrorCode::SettingsError => write!(f, "SETTINGS_ERROR"),
			ErrorCode::IoError => write!(f, "IO_ERROR"),
			ErrorCode::InvalidInput => write!(f, "INVALID_INPUT"),
			ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
		}
	}
}

/// Diagnostic message attached to a command result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
	pub level: DiagnosticLevel,
	pub message: String,
}

impl Diagnostic {
	pub fn info(message: impl Into<String>) -> Self {
		Self {
			level: DiagnosticLevel::Info,
			message: message.into(),
		}
	}

	pub fn warning(message: impl Into<String>) -> Self {
		Self {
			level: DiagnosticLevel::Warning,
			message: message.into(),
		}
	}
}

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
	Info,
	Warning,
	Error,
}

/// Payload of a successful command together with any notes about it.
#[derive(Debug)]
pub struct Outcome<T> {
	pub data: T,
	pub diagnostics: Vec<Diagnostic>,
}

impl<T> Outcome<T> {
	pub fn new(data: T) -> Self {
		Self {
			data,
			diagnostics: Vec::new(),
		}
	}

	pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
		self.diagnostics.push(diagnostic);
		self
	}
}
