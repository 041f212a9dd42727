use pagelens::MAX_TEXT_LENGTH;
use pagelens_protocol::{PageContent, Request, ResponseData};
use tracing::info;

use super::{CommandContext, unexpected_reply};
use crate::background::ContentBridge;
use crate::error::Result;
use crate::output::{Diagnostic, Outcome};

pub async fn execute(ctx: &CommandContext, source: &str) -> Result<Outcome<PageContent>> {
	info!(target = "pagelens", %source, "extract page content");
	let mut bridge = ctx.open(source).await?;
	extract_content(&mut bridge)
}

pub(super) fn extract_content(bridge: &mut ContentBridge) -> Result<Outcome<PageContent>> {
	let ResponseData::PageContent(content) = bridge.request(Request::GetPageContent)? else {
		return Err(unexpected_reply("getPageContent"));
	};

	let chars = content.text.chars().count();
	let mut diagnostics = Vec::new();
	if chars == 0 {
		diagnostics.push(Diagnostic::warning("no readable text found on the page"));
	} else if chars >= MAX_TEXT_LENGTH {
		diagnostics.push(Diagnostic::info(format!("text truncated to {MAX_TEXT_LENGTH} characters")));
	}

	let mut outcome = Outcome::new(content);
	outcome.diagnostics = diagnostics;
	Ok(outcome)
}

#[cfg(test)]
mod tests {
	use pagelens::ContentScript;

	use super::*;

	#[test]
	fn warns_when_page_is_empty() {
		let mut bridge = ContentBridge::new(ContentScript::from_html("<script>x()</script><style>p{}</style><body></body>", ""));
		let outcome = extract_content(&mut bridge).unwrap();
		assert_eq!(outcome.data.text, "");
		assert_eq!(outcome.diagnostics.len(), 1);
	}

	#[test]
	fn notes_truncation() {
		let html = format!("<body><p>{}</p></body>", "a".repeat(MAX_TEXT_LENGTH + 10));
		let mut bridge = ContentBridge::new(ContentScript::from_html(&html, ""));
		let outcome = extract_content(&mut bridge).unwrap();
		assert_eq!(outcome.data.text.chars().count(), MAX_TEXT_LENGTH);
		assert!(outcome.diagnostics[0].message.contains("truncated"));
	}
}
