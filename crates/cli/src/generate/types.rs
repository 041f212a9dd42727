//! Wire types for the `generateContent` endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
	pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub role: Option<String>,
	#[serde(default)]
	pub parts: Vec<Part>,
}

/// Request body: a single user turn holding the prompt.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
	pub contents: Vec<Content>,
}

impl GenerateContentRequest {
	pub fn from_prompt(prompt: &str) -> Self {
		Self {
			contents: vec![Content {
				role: None,
				parts: vec![Part { text: prompt.to_string() }],
			}],
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
	#[serde(default)]
	pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
	/// Text of the first part of the first candidate.
	pub fn first_text(&self) -> Option<&str> {
		self.candidates.first()?.content.as_ref()?.parts.first().map(|part| part.text.as_str())
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
	#[serde(default)]
	pub content: Option<Content>,
	#[serde(default)]
	pub finish_reason: Option<String>,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
	pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
	#[serde(default)]
	pub message: String,
}
