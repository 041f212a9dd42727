//! Command implementations and the envelope every one of them prints.

mod assist;
mod extract;
mod highlight;
mod search;
mod send;
mod settings;

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use pagelens_protocol::ErrorCode as ContentErrorCode;
use serde::Serialize;

use crate::background::ContentBridge;
use crate::cli::{Commands, SettingsAction};
use crate::error::{LensError, Result};
use crate::output::{CommandInputs, OutputFormat, Outcome, ResultBuilder, print_result};
use crate::settings::{SettingsStore, default_settings_path};
use crate::source::PageSource;

/// Shared state for one invocation.
#[derive(Debug)]
pub struct CommandContext {
	pub format: OutputFormat,
	pub settings_path: PathBuf,
	http: reqwest::Client,
}

impl CommandContext {
	pub fn new(format: OutputFormat, settings_path: Option<PathBuf>) -> Result<Self> {
		let http = reqwest::Client::builder()
			.user_agent(concat!("pagelens/", env!("CARGO_PKG_VERSION")))
			.timeout(Duration::from_secs(30))
			.build()?;
		Ok(Self {
			format,
			settings_path: settings_path.unwrap_or_else(default_settings_path),
			http,
		})
	}

	pub fn settings(&self) -> Result<SettingsStore> {
		SettingsStore::load(self.settings_path.clone())
	}

	/// Loads `source` and attaches a content bridge to it.
	pub async fn open(&self, source: &str) -> Result<ContentBridge> {
		let page = PageSource::parse(source).load(&self.http).await?;
		Ok(ContentBridge::from_page(&page))
	}
}

pub async fn dispatch(command: Commands, ctx: &CommandContext) -> Result<()> {
	let name = command.name();
	match command {
		Commands::Extract { source } => emit(ctx, name, CommandInputs::source(&source), extract::execute(ctx, &source)).await,
		Commands::Highlight { source, output } => {
			let inputs = CommandInputs {
				output_path: output.clone(),
				..CommandInputs::source(&source)
			};
			emit(ctx, name, inputs, highlight::execute(ctx, &source, output.as_deref())).await
		}
		Commands::Search { source, query } => {
			let inputs = CommandInputs {
				query: Some(query.clone()),
				..CommandInputs::source(&source)
			};
			emit(ctx, name, inputs, search::execute(ctx, &source, &query)).await
		}
		Commands::Summarize { source } => emit(ctx, name, CommandInputs::source(&source), assist::summarize(ctx, &source)).await,
		Commands::Translate { source, lang } => {
			let inputs = CommandInputs {
				language: lang.clone(),
				..CommandInputs::source(&source)
			};
			emit(ctx, name, inputs, assist::translate(ctx, &source, lang.as_deref())).await
		}
		Commands::Ask { source, question } => {
			let inputs = CommandInputs {
				query: Some(question.clone()),
				..CommandInputs::source(&source)
			};
			emit(ctx, name, inputs, assist::ask(ctx, &source, &question)).await
		}
		Commands::Send { source, message } => emit(ctx, name, CommandInputs::source(&source), send::execute(ctx, &source, &message)).await,
		Commands::Settings { action } => {
			let key = match &action {
				SettingsAction::Get { key } | SettingsAction::Set { key, .. } | SettingsAction::Unset { key } => Some(key.clone()),
				SettingsAction::List => None,
			};
			let inputs = CommandInputs { key, ..Default::default() };
			emit(ctx, name, inputs, settings::execute(ctx, action)).await
		}
	}
}

/// Runs a command and prints its envelope. Failures are printed too and
/// then returned so the process can exit non-zero.
async fn emit<T, F>(ctx: &CommandContext, name: &str, inputs: CommandInputs, run: F) -> Result<()>
where
	T: Serialize,
	F: Future<Output = Result<Outcome<T>>>,
{
	let builder = ResultBuilder::<T>::new(name).inputs(inputs);
	match run.await {
		Ok(outcome) => {
			print_result(&builder.data(outcome.data).diagnostics(outcome.diagnostics).build(), ctx.format);
			Ok(())
		}
		Err(err) => {
			print_result(&builder.error(err.code(), err.user_message()).build(), ctx.format);
			Err(err)
		}
	}
}

fn unexpected_reply(action: &str) -> LensError {
	LensError::Content {
		code: ContentErrorCode::InternalError,
		message: format!("unexpected reply to {action}"),
	}
}
