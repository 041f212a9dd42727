use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "pagelens")]
#[command(about = "PageLens - extract, highlight, search and summarize web pages")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format
	#[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Json)]
	pub format: OutputFormat,

	/// Settings file (defaults to $XDG_CONFIG_HOME/pagelens/settings.json)
	#[arg(long, global = true, value_name = "FILE")]
	pub settings: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Extract readable text and metadata from a page
	Extract {
		/// Path, `-` for stdin, or http(s) URL
		source: String,
	},

	/// Highlight the most important sentences of a page
	#[command(alias = "hl")]
	Highlight {
		source: String,
		/// Write the highlighted HTML to this file
		#[arg(short, long)]
		output: Option<PathBuf>,
	},

	/// Find sentences containing every term of a query
	Search { source: String, query: String },

	/// Summarize a page with the generation API
	#[command(alias = "sum")]
	Summarize { source: String },

	/// Translate a page with the generation API
	Translate {
		source: String,
		/// Target language (defaults to the `targetLanguage` setting, else English)
		#[arg(short, long)]
		lang: Option<String>,
	},

	/// Answer a question about a page with the generation API
	Ask { source: String, question: String },

	/// Send a raw message-bus request, e.g. '{"action":"ping"}'
	Send { source: String, message: String },

	/// Read and write persisted settings
	Settings {
		#[command(subcommand)]
		action: SettingsAction,
	},
}

impl Commands {
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Extract { .. } => "extract",
			Commands::Highlight { .. } => "highlight",
			Commands::Search { .. } => "search",
			Commands::Summarize { .. } => "summarize",
			Commands::Translate { .. } => "translate",
			Commands::Ask { .. } => "ask",
			Commands::Send { .. } => "send",
			Commands::Settings { action } => match action {
				SettingsAction::Get { .. } => "settings.get",
				SettingsAction::Set { .. } => "settings.set",
				SettingsAction::Unset { .. } => "settings.unset",
				SettingsAction::List => "settings.list",
			},
		}
	}
}

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
	/// Show one setting
	Get { key: String },
	/// Store a setting; JSON values are parsed, anything else is a string
	Set { key: String, value: String },
	/// Remove a setting
	Unset { key: String },
	/// Show all settings with secrets masked
	List,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_highlight_with_output() {
		let cli = Cli::try_parse_from(["pagelens", "highlight", "page.html", "-o", "/tmp/out.html"]).unwrap();
		match cli.command {
			Commands::Highlight { source, output } => {
				assert_eq!(source, "page.html");
				assert_eq!(output, Some(PathBuf::from("/tmp/out.html")));
			}
			_ => panic!("Expected Highlight command"),
		}
	}

	#[test]
	fn global_flags_after_subcommand() {
		let cli = Cli::try_parse_from(["pagelens", "search", "-", "rust", "-vv", "--format", "text"]).unwrap();
		assert_eq!(cli.verbose, 2);
		assert_eq!(cli.format, OutputFormat::Text);
		assert_eq!(cli.command.name(), "search");
	}

	#[test]
	fn defaults_to_json_output() {
		let cli = Cli::try_parse_from(["pagelens", "extract", "page.html"]).unwrap();
		assert_eq!(cli.format, OutputFormat::Json);
		assert!(cli.settings.is_none());
	}

	#[test]
	fn parse_settings_set() {
		let cli = Cli::try_parse_from(["pagelens", "settings", "set", "model", "gemini-pro"]).unwrap();
		match cli.command {
			Commands::Settings {
				action: SettingsAction::Set { key, value },
			} => {
				assert_eq!(key, "model");
				assert_eq!(value, "gemini-pro");
			}
			_ => panic!("Expected settings set"),
		}
	}

	#[test]
	fn translate_lang_is_optional() {
		let cli = Cli::try_parse_from(["pagelens", "translate", "page.html"]).unwrap();
		assert!(matches!(cli.command, Commands::Translate { lang: None, .. }));
	}
}
