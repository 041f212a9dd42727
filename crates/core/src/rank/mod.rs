//! Heuristic sentence-importance ranking.
//!
//! Each candidate sentence scores the sum of three independent terms:
//!
//! * length: `min(chars / 100, 2)`
//! * keywords: `+1` for every importance keyword contained in the sentence
//!   (case-insensitive substring match, each keyword counted once)
//! * brevity: `max(0, 1 - chars / 1000)`
//!
//! Ranking is deterministic; equal scores keep their document order.

mod sentences;

pub use sentences::split_sentences;

use crate::patterns::keywords;

/// Fragments shorter than this many characters are not candidates.
pub const MIN_SENTENCE_CHARS: usize = 20;
/// Number of sentences [`rank`] returns at most.
pub const TOP_SENTENCES: usize = 5;

/// A candidate sentence with its score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSentence {
	pub text: String,
	pub score: f64,
}

/// Up to [`TOP_SENTENCES`] sentences from `text`, highest score first.
pub fn rank(text: &str) -> Vec<String> {
	let mut scored = score_sentences(text);
	scored.sort_by(|a, b| b.score.total_cmp(&a.score));
	scored.into_iter().take(TOP_SENTENCES).map(|s| s.text).collect()
}

/// Every qualifying sentence of `text` with its score, in document order.
pub fn score_sentences(text: &str) -> Vec<ScoredSentence> {
	split_sentences(text)
		.filter(|s| s.chars().count() >= MIN_SENTENCE_CHARS)
		.map(|s| ScoredSentence {
			text: s.to_string(),
			score: score_sentence(s),
		})
		.collect()
}

pub fn score_sentence(sentence: &str) -> f64 {
	let chars = sentence.chars().count() as f64;
	length_term(chars) + keyword_term(sentence) + brevity_term(chars)
}

fn length_term(chars: f64) -> f64 {
	(chars / 100.0).min(2.0)
}

fn keyword_term(sentence: &str) -> f64 {
	let lower = sentence.to_lowercase();
	keywords().iter().filter(|k| lower.contains(k.as_str())).count() as f64
}

// Decays with length only; the sentence's position in the page plays no part.
fn brevity_term(chars: f64) -> f64 {
	(1.0 - chars / 1000.0).max(0.0)
}
