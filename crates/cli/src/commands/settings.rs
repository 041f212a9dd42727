use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::CommandContext;
use crate::cli::SettingsAction;
use crate::error::{LensError, Result};
use crate::output::{Diagnostic, Outcome};
use crate::settings::{API_KEY_ENV, SettingsStore, keys, parse_value};

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SettingsData {
	Value { key: String, value: Option<Value> },
	Removed { key: String, removed: bool },
	All { path: String, values: BTreeMap<String, Value> },
}

pub async fn execute(ctx: &CommandContext, action: SettingsAction) -> Result<Outcome<SettingsData>> {
	let mut store = ctx.settings()?;
	apply(&mut store, action)
}

pub(super) fn apply(store: &mut SettingsStore, action: SettingsAction) -> Result<Outcome<SettingsData>> {
	match action {
		SettingsAction::Get { key } => {
			let value = store.redacted().remove(&key);
			Ok(Outcome::new(SettingsData::Value { key, value }))
		}
		SettingsAction::Set { key, value } => {
			let key = validate_key(key)?;
			store.set(key.clone(), parse_value(&value));
			store.save()?;
			info!(target = "pagelens", %key, path = %store.path().display(), "setting saved");
			let shown = store.redacted().remove(&key);
			let outcome = Outcome::new(SettingsData::Value { key: key.clone(), value: shown });
			if key == keys::API_KEY && std::env::var_os(API_KEY_ENV).is_some() {
				return Ok(outcome.with_diagnostic(Diagnostic::warning(format!("{API_KEY_ENV} is set and takes precedence over the stored key"))));
			}
			Ok(outcome)
		}
		SettingsAction::Unset { key } => {
			let removed = store.unset(&key);
			if removed {
				store.save()?;
			}
			Ok(Outcome::new(SettingsData::Removed { key, removed }))
		}
		SettingsAction::List => Ok(Outcome::new(SettingsData::All {
			path: store.path().display().to_string(),
			values: store.redacted(),
		})),
	}
}

fn validate_key(key: String) -> Result<String> {
	let trimmed = key.trim();
	if trimmed.is_empty() {
		return Err(LensError::InvalidInput("setting key is empty".into()));
	}
	Ok(trimmed.to_string())
}
