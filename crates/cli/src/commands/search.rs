use pagelens_protocol::{Request, ResponseData, SearchResults};
use tracing::info;

use super::{CommandContext, unexpected_reply};
use crate::background::ContentBridge;
use crate::error::Result;
use crate::output::{Diagnostic, Outcome};

pub async fn execute(ctx: &CommandContext, source: &str, query: &str) -> Result<Outcome<SearchResults>> {
	info!(target = "pagelens", %source, %query, "search in page");
	let mut bridge = ctx.open(source).await?;
	search_page(&mut bridge, query)
}

pub(super) fn search_page(bridge: &mut ContentBridge, query: &str) -> Result<Outcome<SearchResults>> {
	let ResponseData::SearchResults(results) = bridge.request(Request::SearchInPage { query: query.to_string() })? else {
		return Err(unexpected_reply("searchInPage"));
	};
	let shown = results.matches.len();
	let total = results.total_matches;
	let outcome = Outcome::new(results);
	if total > shown {
		return Ok(outcome.with_diagnostic(Diagnostic::info(format!("showing {shown} of {total} matching sentences"))));
	}
	Ok(outcome)
}
