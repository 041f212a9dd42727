use clap::Parser;
use pagelens_cli::cli::Cli;
use pagelens_cli::commands::{self, CommandContext};
use pagelens_cli::logging;
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let ctx = CommandContext::new(cli.format, cli.settings)?;
	if let Err(err) = commands::dispatch(cli.command, &ctx).await {
		error!(target = "pagelens", error = %err, "command failed");
		std::process::exit(1);
	}
	Ok(())
}
