//! `generateContent` HTTP client with 503 retry.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::types::{ApiErrorBody, GenerateContentRequest, GenerateContentResponse};
use super::{GenerateError, GenerationConfig, RetryPolicy, TextGenerator};

pub struct GeminiClient {
	http: Client,
	config: GenerationConfig,
}

impl GeminiClient {
	pub fn new(config: GenerationConfig) -> Result<Self, GenerateError> {
		if config.api_key.trim().is_empty() {
			return Err(GenerateError::MissingApiKey);
		}
		let http = Client::builder()
			.connect_timeout(Duration::from_secs(10))
			.timeout(Duration::from_secs(120))
			.build()
			.map_err(|e| GenerateError::Network(e.to_string()))?;
		Ok(Self { http, config })
	}

	fn endpoint(&self) -> String {
		format!("{}/models/{}:generateContent", self.config.base_url, self.config.model)
	}

	async fn send_once(&self, request: &GenerateContentRequest) -> Result<(StatusCode, String), GenerateError> {
		let response = self
			.http
			.post(self.endpoint())
			.query(&[("key", self.config.api_key.as_str())])
			.json(request)
			.send()
			.await
			.map_err(|e| GenerateError::Network(e.to_string()))?;
		let status = response.status();
		let body = response.text().await.map_err(|e| GenerateError::Network(e.to_string()))?;
		Ok((status, body))
	}
}

#[async_trait]
impl TextGenerator for GeminiClient {
	async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
		let request = GenerateContentRequest::from_prompt(prompt);
		let RetryPolicy { max_retries, delay } = self.config.retry;
		let mut attempt = 0;

		let body = loop {
			attempt += 1;
			debug!(target = "pagelens", model = %self.config.model, attempt, prompt_chars = prompt.chars().count(), "generateContent");
			let (status, body) = self.send_once(&request).await?;

			if status == StatusCode::SERVICE_UNAVAILABLE {
				if attempt > max_retries {
					return Err(GenerateError::Unavailable { attempts: attempt });
				}
				warn!(target = "pagelens", attempt, delay_ms = delay.as_millis() as u64, "generation service unavailable, retrying");
				tokio::time::sleep(delay).await;
				continue;
			}
			if !status.is_success() {
				let message = serde_json::from_str::<ApiErrorBody>(&body).map(|e| e.error.message).unwrap_or(body);
				return Err(GenerateError::Api {
					status: status.as_u16(),
					message,
				});
			}
			break body;
		};

		let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| GenerateError::MalformedResponse(e.to_string()))?;
		parsed
			.first_text()
			.map(str::to_string)
			.ok_or_else(|| GenerateError::MalformedResponse("response has no candidate text".into()))
	}

	fn model(&self) -> &str {
		&self.config.model
	}
}
