use std::path::{Path, PathBuf};

use pagelens_protocol::{Request, ResponseData};
use serde::Serialize;
use tracing::info;

use super::{CommandContext, unexpected_reply};
use crate::background::ContentBridge;
use crate::error::Result;
use crate::output::{Diagnostic, Outcome};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightReport {
	pub sentences: Vec<String>,
	pub highlighted: usize,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub output_path: Option<PathBuf>,
}

pub async fn execute(ctx: &CommandContext, source: &str, output: Option<&Path>) -> Result<Outcome<HighlightReport>> {
	info!(target = "pagelens", %source, "highlight important content");
	let mut bridge = ctx.open(source).await?;
	highlight_page(&mut bridge, output)
}

pub(super) fn highlight_page(bridge: &mut ContentBridge, output: Option<&Path>) -> Result<Outcome<HighlightReport>> {
	let ResponseData::Highlighted { sentences, highlighted } = bridge.request(Request::HighlightImportantContent)? else {
		return Err(unexpected_reply("highlightImportantContent"));
	};

	if let Some(path) = output {
		std::fs::write(path, bridge.document().to_html())?;
		info!(target = "pagelens", path = %path.display(), "wrote highlighted page");
	}

	let mut outcome = Outcome::new(HighlightReport {
		sentences,
		highlighted,
		output_path: output.map(Path::to_path_buf),
	});
	if outcome.data.sentences.is_empty() {
		outcome = outcome.with_diagnostic(Diagnostic::warning("no sentence was long enough to rank"));
	} else if outcome.data.highlighted == 0 {
		outcome = outcome.with_diagnostic(Diagnostic::info("ranked sentences span several elements and could not be marked in place"));
	}
	Ok(outcome)
}
