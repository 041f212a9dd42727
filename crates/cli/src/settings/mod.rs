//! Persistent settings shared across invocations.
//!
//! Settings are a flat map of string keys to JSON values stored in
//! `$XDG_CONFIG_HOME/pagelens/settings.json` (falling back to the platform
//! config directory). The API key can always be overridden through the
//! `PAGELENS_API_KEY` environment variable.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{LensError, Result};

#[cfg(test)]
mod tests;

const SETTINGS_SCHEMA_VERSION: u32 = 1;

/// Environment variable taking precedence over the stored API key.
pub const API_KEY_ENV: &str = "PAGELENS_API_KEY";

/// Well-known setting keys.
pub mod keys {
	pub const API_KEY: &str = "apiKey";
	pub const API_BASE_URL: &str = "apiBaseUrl";
	pub const MODEL: &str = "model";
	pub const TARGET_LANGUAGE: &str = "targetLanguage";
	pub const RETRY_DELAY_MS: &str = "retryDelayMs";
}

/// On-disk format of the settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsFile {
	pub schema: u32,
	#[serde(default)]
	pub values: BTreeMap<String, Value>,
}

impl Default for SettingsFile {
	fn default() -> Self {
		Self {
			schema: SETTINGS_SCHEMA_VERSION,
			values: BTreeMap::new(),
		}
	}
}

/// A settings file loaded from a path.
#[derive(Debug)]
pub struct SettingsStore {
	path: PathBuf,
	file: SettingsFile,
}

impl SettingsStore {
	/// Loads the store at `path`. A missing file yields empty settings; a
	/// file that cannot be parsed is an error so it is never overwritten.
	pub fn load(path: PathBuf) -> Result<Self> {
		let file = match fs::read_to_string(&path) {
			Ok(content) => serde_json::from_str(&content).map_err(|e| LensError::Settings {
				path: path.clone(),
				message: e.to_string(),
			})?,
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => SettingsFile::default(),
			Err(err) => return Err(err.into()),
		};
		debug!(target = "pagelens", path = %path.display(), "loaded settings");
		Ok(Self { path, file })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.file.values.get(key)
	}

	/// String value of `key`, ignoring empty strings and non-string values.
	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.get(key).and_then(Value::as_str).filter(|s| !s.trim().is_empty())
	}

	pub fn get_u64(&self, key: &str) -> Option<u64> {
		self.get(key).and_then(Value::as_u64)
	}

	pub fn set(&mut self, key: impl Into<String>, value: Value) {
		self.file.values.insert(key.into(), value);
	}

	/// Removes `key`. Returns whether it was present.
	pub fn unset(&mut self, key: &str) -> bool {
		self.file.values.remove(key).is_some()
	}

	pub fn values(&self) -> &BTreeMap<String, Value> {
		&self.file.values
	}

	/// API key from the environment, else from the store.
	pub fn api_key(&self) -> Option<String> {
		std::env::var(API_KEY_ENV)
			.ok()
			.filter(|key| !key.trim().is_empty())
			.or_else(|| self.get_str(keys::API_KEY).map(str::to_string))
	}

	/// Values as shown to the user, with secrets masked.
	pub fn redacted(&self) -> BTreeMap<String, Value> {
		self.file
			.values
			.iter()
			.map(|(key, value)| {
				let shown = if key == keys::API_KEY {
					Value::String(mask_secret(value.as_str().unwrap_or_default()))
				} else {
					value.clone()
				};
				(key.clone(), shown)
			})
			.collect()
	}

	pub fn save(&self) -> Result<()> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent)?;
		}
		if self.file.schema != SETTINGS_SCHEMA_VERSION {
			warn!(target = "pagelens", schema = self.file.schema, "saving settings with unexpected schema version");
		}
		let json = serde_json::to_string_pretty(&self.file)?;
		fs::write(&self.path, json)?;
		debug!(target = "pagelens", path = %self.path.display(), keys = self.file.values.len(), "saved settings");
		Ok(())
	}
}

/// Parses a command-line value: valid JSON is kept as is, anything else is
/// stored as a string.
pub fn parse_value(raw: &str) -> Value {
	serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn mask_secret(secret: &str) -> String {
	let chars: Vec<char> = secret.chars().collect();
	if chars.len() <= 4 {
		return "****".to_string();
	}
	let tail: String = chars[chars.len() - 4..].iter().collect();
	format!("****{tail}")
}

pub fn default_settings_path() -> PathBuf {
	std::env::var_os("XDG_CONFIG_HOME")
		.map(PathBuf::from)
		.or_else(dirs::config_dir)
		.unwrap_or_else(|| PathBuf::from("."))
		.join("pagelens/settings.json")
}
