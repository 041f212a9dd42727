//! Client for the external text-generation API.
//!
//! Commands talk to [`TextGenerator`]; [`GeminiClient`] is the production
//! implementation and retries requests the service rejects as temporarily
//! unavailable.

mod client;
pub mod prompt;
mod types;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use client::GeminiClient;

use crate::settings::{SettingsStore, keys};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
/// Retries after the first attempt when the service answers 503.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum GenerateError {
	#[error("No API key configured")]
	MissingApiKey,

	#[error("Generation service unavailable after {attempts} attempts")]
	Unavailable { attempts: u32 },

	#[error("Generation API returned {status}: {message}")]
	Api { status: u16, message: String },

	#[error("Malformed generation response: {0}")]
	MalformedResponse(String),

	#[error("Network error: {0}")]
	Network(String),
}

/// Produces text for a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
	async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;

	/// Model identifier reported alongside generated text.
	fn model(&self) -> &str;
}

/// How many times, and how far apart, 503 responses are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
	pub max_retries: u32,
	pub delay: Duration,
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self {
			max_retries: DEFAULT_MAX_RETRIES,
			delay: DEFAULT_RETRY_DELAY,
		}
	}
}

/// Everything needed to build a [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GenerationConfig {
	pub api_key: String,
	pub base_url: String,
	pub model: String,
	pub retry: RetryPolicy,
}

impl GenerationConfig {
	pub fn new(api_key: impl Into<String>) -> Self {
		Self {
			api_key: api_key.into(),
			base_url: DEFAULT_BASE_URL.to_string(),
			model: DEFAULT_MODEL.to_string(),
			retry: RetryPolicy::default(),
		}
	}

	/// Reads the generation settings, failing before any request is made
	/// when no API key is available.
	pub fn from_settings(settings: &SettingsStore) -> Result<Self, GenerateError> {
		let api_key = settings.api_key().ok_or(GenerateError::MissingApiKey)?;
		let mut config = Self::new(api_key);
		if let Some(base_url) = settings.get_str(keys::API_BASE_URL) {
			config.base_url = base_url.trim_end_matches('/').to_string();
		}
		if let Some(model) = settings.get_str(keys::MODEL) {
			config.model = model.to_string();
		}
		if let Some(delay_ms) = settings.get_u64(keys::RETRY_DELAY_MS) {
			config.retry.delay = Duration::from_millis(delay_ms);
		}
		Ok(config)
	}
}
