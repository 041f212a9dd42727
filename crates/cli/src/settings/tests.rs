use serde_json::json;
use tempfile::TempDir;

use super::*;

fn store_in(dir: &TempDir) -> SettingsStore {
	SettingsStore::load(dir.path().join("nested/settings.json")).unwrap()
}

#[test]
fn missing_file_loads_empty() {
	let dir = TempDir::new().unwrap();
	let store = store_in(&dir);
	assert!(store.values().is_empty());
	assert!(store.get(keys::MODEL).is_none());
}

#[test]
fn set_save_and_reload() {
	let dir = TempDir::new().unwrap();
	let mut store = store_in(&dir);
	store.set(keys::MODEL, json!("gemini-pro"));
	store.set("highlightColor", json!({"r": 255}));
	store.save().unwrap();

	let reloaded = store_in(&dir);
	assert_eq!(reloaded.get_str(keys::MODEL), Some("gemini-pro"));
	assert_eq!(reloaded.get("highlightColor"), Some(&json!({"r": 255})));

	let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(reloaded.path()).unwrap()).unwrap();
	assert_eq!(raw["schema"], 1);
}

#[test]
fn unset_reports_presence() {
	let dir = TempDir::new().unwrap();
	let mut store = store_in(&dir);
	store.set(keys::TARGET_LANGUAGE, json!("French"));
	assert!(store.unset(keys::TARGET_LANGUAGE));
	assert!(!store.unset(keys::TARGET_LANGUAGE));
}

#[test]
fn corrupt_file_is_an_error() {
	let dir = TempDir::new().unwrap();
	let path = dir.path().join("settings.json");
	std::fs::write(&path, "{not json").unwrap();
	let err = SettingsStore::load(path).unwrap_err();
	assert!(matches!(err, LensError::Settings { .. }));
}

#[test]
fn empty_strings_read_as_unset() {
	let dir = TempDir::new().unwrap();
	let mut store = store_in(&dir);
	store.set(keys::MODEL, json!("  "));
	assert_eq!(store.get_str(keys::MODEL), None);
}

#[test]
fn api_key_is_masked_in_listing() {
	let dir = TempDir::new().unwrap();
	let mut store = store_in(&dir);
	store.set(keys::API_KEY, json!("secret-abcd1234"));
	store.set("short", json!(1));
	let shown = store.redacted();
	assert_eq!(shown[keys::API_KEY], json!("****1234"));
	assert_eq!(shown["short"], json!(1));
}

#[test]
fn parse_value_accepts_json_or_plain_text() {
	assert_eq!(parse_value("42"), json!(42));
	assert_eq!(parse_value("true"), json!(true));
	assert_eq!(parse_value("English"), json!("English"));
	assert_eq!(parse_value("\"quoted\""), json!("quoted"));
}
