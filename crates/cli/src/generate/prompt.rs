//! Prompt builders for the generation-backed commands.

use std::fmt::Write;

use pagelens_protocol::{PageContent, SearchResults};

/// Language used for translations when none is configured.
pub const DEFAULT_TARGET_LANGUAGE: &str = "English";

pub fn summary_prompt(content: &PageContent) -> String {
	let mut prompt = String::from(
		"Summarize the following web page. Start with a one-sentence overview, then list the key points as short bullet points. \
		 Answer in the language of the page.\n\n",
	);
	push_page_header(&mut prompt, content);
	let _ = write!(prompt, "Content:\n{}", content.text);
	prompt
}

pub fn translation_prompt(content: &PageContent, language: &str) -> String {
	let mut prompt = format!("Translate the following web page content into {language}. Keep the paragraph structure and output only the translation.\n\n");
	push_page_header(&mut prompt, content);
	let _ = write!(prompt, "Content:\n{}", content.text);
	prompt
}

/// Question prompt grounded on the sentences that matched the question,
/// followed by an excerpt of the page for wider context.
pub fn question_prompt(question: &str, results: &SearchResults) -> String {
	let mut prompt = String::from("Answer the question using only the web page content below. If the page does not contain the answer, say so.\n\n");
	let _ = writeln!(prompt, "Title: {}", results.title);
	if !results.url.is_empty() {
		let _ = writeln!(prompt, "URL: {}", results.url);
	}
	if !results.matches.is_empty() {
		prompt.push_str("\nRelevant sentences:\n");
		for m in &results.matches {
			let _ = writeln!(prompt, "- {}", m.text);
		}
	}
	let _ = write!(prompt, "\nPage excerpt:\n{}\n\nQuestion: {question}", results.excerpt);
	prompt
}

fn push_page_header(prompt: &mut String, content: &PageContent) {
	let _ = writeln!(prompt, "Title: {}", content.title);
	if !content.url.is_empty() {
		let _ = writeln!(prompt, "URL: {}", content.url);
	}
	prompt.push('\n');
}
