//! Generation-backed commands: summarize, translate and ask.

use pagelens_protocol::{PageContent, Request, ResponseData, SearchResults};
use serde::Serialize;
use tracing::info;

use super::extract::extract_content;
use super::{CommandContext, unexpected_reply};
use crate::background::ContentBridge;
use crate::error::{LensError, Result};
use crate::generate::prompt::{DEFAULT_TARGET_LANGUAGE, question_prompt, summary_prompt, translation_prompt};
use crate::generate::{GeminiClient, GenerationConfig, TextGenerator};
use crate::output::{Diagnostic, Outcome};
use crate::settings::keys;

const QUESTION_STOPWORDS: &[&str] = &[
	"what", "which", "when", "where", "who", "whom", "whose", "why", "how", "does", "did", "the", "and", "are", "was", "were", "this", "that", "with",
	"from", "about", "have", "has", "there", "their", "would", "could", "should", "page", "article",
];

/// Generated text together with what produced it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Generated {
	pub text: String,
	pub model: String,
	pub prompt_chars: usize,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub language: Option<String>,
}

pub async fn summarize(ctx: &CommandContext, source: &str) -> Result<Outcome<Generated>> {
	let generator = client(ctx)?;
	info!(target = "pagelens", %source, model = generator.model(), "summarize page");
	let mut bridge = ctx.open(source).await?;
	let content = readable_content(&mut bridge)?;
	summarize_content(&content, &generator).await
}

pub async fn translate(ctx: &CommandContext, source: &str, lang: Option<&str>) -> Result<Outcome<Generated>> {
	let settings = ctx.settings()?;
	let language = lang
		.map(str::to_string)
		.or_else(|| settings.get_str(keys::TARGET_LANGUAGE).map(str::to_string))
		.unwrap_or_else(|| DEFAULT_TARGET_LANGUAGE.to_string());
	let generator = GeminiClient::new(GenerationConfig::from_settings(&settings)?)?;
	info!(target = "pagelens", %source, %language, "translate page");
	let mut bridge = ctx.open(source).await?;
	let content = readable_content(&mut bridge)?;
	translate_content(&content, &language, &generator).await
}

pub async fn ask(ctx: &CommandContext, source: &str, question: &str) -> Result<Outcome<Generated>> {
	let query = question_terms(question);
	if query.is_empty() {
		return Err(LensError::InvalidInput("question is empty".into()));
	}
	let generator = client(ctx)?;
	info!(target = "pagelens", %source, %query, "ask about page");
	let mut bridge = ctx.open(source).await?;
	let ResponseData::SearchResults(results) = bridge.request(Request::SearchInPage { query })? else {
		return Err(unexpected_reply("searchInPage"));
	};
	answer_question(question, &results, &generator).await
}

pub(super) async fn summarize_content(content: &PageContent, generator: &dyn TextGenerator) -> Result<Outcome<Generated>> {
	let prompt = summary_prompt(content);
	Ok(Outcome::new(generate(generator, &prompt, None).await?))
}

pub(super) async fn translate_content(content: &PageContent, language: &str, generator: &dyn TextGenerator) -> Result<Outcome<Generated>> {
	let prompt = translation_prompt(content, language);
	Ok(Outcome::new(generate(generator, &prompt, Some(language.to_string())).await?))
}

pub(super) async fn answer_question(question: &str, results: &SearchResults, generator: &dyn TextGenerator) -> Result<Outcome<Generated>> {
	let prompt = question_prompt(question, results);
	let outcome = Outcome::new(generate(generator, &prompt, None).await?);
	if results.matches.is_empty() {
		return Ok(outcome.with_diagnostic(Diagnostic::info("no sentence matched the question; answered from the page excerpt")));
	}
	Ok(outcome)
}

/// Search query for a question: its content words, lowercased.
///
/// Falls back to every word when the question holds nothing but stopwords.
pub(super) fn question_terms(question: &str) -> String {
	let words: Vec<String> = question
		.split(|c: char| !c.is_alphanumeric())
		.filter(|w| !w.is_empty())
		.map(str::to_lowercase)
		.collect();
	let content: Vec<&str> = words
		.iter()
		.map(String::as_str)
		.filter(|w| w.chars().count() > 2 && !QUESTION_STOPWORDS.contains(w))
		.collect();
	if content.is_empty() { words.join(" ") } else { content.join(" ") }
}

fn client(ctx: &CommandContext) -> Result<GeminiClient> {
	let settings = ctx.settings()?;
	Ok(GeminiClient::new(GenerationConfig::from_settings(&settings)?)?)
}

fn readable_content(bridge: &mut ContentBridge) -> Result<PageContent> {
	let content = extract_content(bridge)?.data;
	if content.text.is_empty() {
		return Err(LensError::InvalidInput("the page has no readable text".into()));
	}
	Ok(content)
}

async fn generate(generator: &dyn TextGenerator, prompt: &str, language: Option<String>) -> Result<Generated> {
	let text = generator.generate(prompt).await?;
	Ok(Generated {
		text,
		model: generator.model().to_string(),
		prompt_chars: prompt.chars().count(),
		language,
	})
}

#[cfg(test)]
mod tests {
	use std::sync::Mutex;

	use async_trait::async_trait;
	use pagelens::ContentScript;

	use super::*;
	use crate::generate::GenerateError;

	/// Records prompts and answers with a fixed reply.
	struct FakeGenerator {
		reply: std::result::Result<String, u16>,
		prompts: Mutex<Vec<String>>,
	}

	impl FakeGenerator {
		fn replying(text: &str) -> Self {
			Self {
				reply: Ok(text.to_string()),
				prompts: Mutex::new(Vec::new()),
			}
		}

		fn failing(status: u16) -> Self {
			Self {
				reply: Err(status),
				prompts: Mutex::new(Vec::new()),
			}
		}

		fn last_prompt(&self) -> String {
			self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
		}
	}

	#[async_trait]
	impl TextGenerator for FakeGenerator {
		async fn generate(&self, prompt: &str) -> std::result::Result<String, GenerateError> {
			self.prompts.lock().unwrap().push(prompt.to_string());
			self.reply.clone().map_err(|status| GenerateError::Api {
				status,
				message: "rejected".into(),
			})
		}

		fn model(&self) -> &str {
			"fake-model"
		}
	}

	fn content() -> PageContent {
		PageContent {
			title: "Ferris".into(),
			url: "https://example.com/ferris".into(),
			text: "Ferris is the unofficial mascot of Rust. Ferris is a crab.".into(),
			..Default::default()
		}
	}

	#[tokio::test]
	async fn summary_reports_model_and_prompt_size() {
		let generator = FakeGenerator::replying("Ferris is a crab mascot.");
		let outcome = summarize_content(&content(), &generator).await.unwrap();
		assert_eq!(outcome.data.text, "Ferris is a crab mascot.");
		assert_eq!(outcome.data.model, "fake-model");
		assert_eq!(outcome.data.prompt_chars, generator.last_prompt().chars().count());
		assert!(generator.last_prompt().contains("Ferris is a crab."));
	}

	#[tokio::test]
	async fn translation_carries_language() {
		let generator = FakeGenerator::replying("Ferris est un crabe.");
		let outcome = translate_content(&content(), "French", &generator).await.unwrap();
		assert_eq!(outcome.data.language.as_deref(), Some("French"));
		assert!(generator.last_prompt().contains("into French"));
	}

	#[tokio::test]
	async fn generation_failures_propagate() {
		let generator = FakeGenerator::failing(500);
		let err = summarize_content(&content(), &generator).await.unwrap_err();
		assert!(matches!(err, LensError::Generate(GenerateError::Api { status: 500, .. })));
	}

	#[tokio::test]
	async fn answers_from_matching_sentences() {
		let html = "<body><main><p>Ferris is the unofficial mascot of Rust. The language itself has no official mascot.</p></main></body>";
		let mut bridge = ContentBridge::new(ContentScript::from_html(html, ""));
		let query = question_terms("Who is the mascot of Rust?");
		assert_eq!(query, "mascot rust");

		let ResponseData::SearchResults(results) = bridge.request(Request::SearchInPage { query }).unwrap() else {
			panic!("expected search results");
		};
		let generator = FakeGenerator::replying("Ferris.");
		let outcome = answer_question("Who is the mascot of Rust?", &results, &generator).await.unwrap();
		assert!(outcome.diagnostics.is_empty());
		assert!(generator.last_prompt().contains("- Ferris is the unofficial mascot of Rust"));
	}

	#[test]
	fn question_terms_fall_back_to_all_words() {
		assert_eq!(question_terms("What is this?"), "what is this");
		assert_eq!(question_terms("  ?? "), "");
	}
}
