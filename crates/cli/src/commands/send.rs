use pagelens_protocol::Response;
use tracing::info;

use super::CommandContext;
use crate::error::Result;
use crate::output::{Diagnostic, Outcome};

/// Forwards a raw message and returns the content script's reply as data,
/// whether or not the reply itself reports success.
pub async fn execute(ctx: &CommandContext, source: &str, message: &str) -> Result<Outcome<Response>> {
	info!(target = "pagelens", %source, "send raw message");
	let mut bridge = ctx.open(source).await?;
	let reply = bridge.send_raw(message)?;
	let note = reply.error.as_ref().map(|error| Diagnostic::warning(format!("content script replied {}: {}", error.code, error.message)));
	let outcome = Outcome::new(reply);
	Ok(match note {
		Some(diagnostic) => outcome.with_diagnostic(diagnostic),
		None => outcome,
	})
}
