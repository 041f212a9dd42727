//! Integration tests running the `pagelens` binary on local fixtures.
//!
//! Every test points `--settings` at its own temporary directory and clears
//! `PAGELENS_API_KEY`, so no test touches the user's settings or the network.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde_json::Value;
use tempfile::TempDir;

const ARTICLE: &str = "<html><head><title>Crab Facts</title><meta name='description' content='All about crabs'></head>\
<body><nav>Home | Shop</nav><article><h1 id='top'>Crab Facts</h1>\
<p>Crabs walk sideways because of the way their legs bend at the joints.</p>\
<p>The most important fact is that crabs molt their shells as they grow larger.</p>\
<img src='/crab.png' alt='A crab'><a href='/more'>More crabs</a></article>\
<footer>Copyright</footer></body></html>";

struct Fixture {
	dir: TempDir,
}

impl Fixture {
	fn new() -> Self {
		Self {
			dir: TempDir::new().expect("temp dir"),
		}
	}

	fn page(&self, html: &str) -> PathBuf {
		let path = self.dir.path().join("page.html");
		std::fs::write(&path, html).expect("write fixture");
		path
	}

	fn settings_path(&self) -> PathBuf {
		self.dir.path().join("config/settings.json")
	}

	fn command(&self) -> Command {
		let mut cmd = Command::new(env!("CARGO_BIN_EXE_pagelens"));
		cmd.env_remove("PAGELENS_API_KEY")
			.env_remove("RUST_LOG")
			.arg("--settings")
			.arg(self.settings_path())
			.args(["-f", "json"]);
		cmd
	}

	fn run(&self, args: &[&str]) -> (bool, Value, String) {
		let output = self.command().args(args).output().expect("Failed to execute pagelens");
		parse(output)
	}

	fn run_with_stdin(&self, args: &[&str], stdin: &str) -> (bool, Value, String) {
		let mut child = self
			.command()
			.args(args)
			.stdin(Stdio::piped())
			.stdout(Stdio::piped())
			.stderr(Stdio::piped())
			.spawn()
			.expect("Failed to spawn pagelens");
		child.stdin.take().expect("stdin").write_all(stdin.as_bytes()).expect("write stdin");
		parse(child.wait_with_output().expect("wait for pagelens"))
	}
}

fn parse(output: std::process::Output) -> (bool, Value, String) {
	let stdout = String::from_utf8_lossy(&output.stdout).to_string();
	let stderr = String::from_utf8_lossy(&output.stderr).to_string();
	let json = serde_json::from_str(&stdout).unwrap_or_else(|err| panic!("Expected JSON stdout: {err}\nstdout:\n{stdout}\nstderr:\n{stderr}"));
	(output.status.success(), json, stderr)
}

fn path_str(path: &Path) -> &str {
	path.to_str().expect("utf-8 temp path")
}

#[test]
fn extract_returns_page_content() {
	let fx = Fixture::new();
	let page = fx.page(ARTICLE);
	let (success, json, stderr) = fx.run(&["extract", path_str(&page)]);

	assert!(success, "Command failed: {stderr}");
	assert_eq!(json["ok"], true);
	assert_eq!(json["command"], "extract");
	let data = &json["data"];
	assert_eq!(data["title"], "Crab Facts");
	assert!(data["url"].as_str().unwrap().starts_with("file://"));
	let text = data["text"].as_str().unwrap();
	assert!(text.starts_with("Crab Facts Crabs walk sideways"));
	assert!(!text.contains("Home | Shop"));
	assert!(!text.contains("Copyright"));
	assert_eq!(data["headings"][0]["level"], 1);
	assert_eq!(data["headings"][0]["id"], "top");
	assert_eq!(data["images"][0]["alt"], "A crab");
	assert_eq!(data["links"][0]["text"], "More crabs");
	assert_eq!(data["metadata"]["description"], "All about crabs");
}

#[test]
fn extract_reads_stdin() {
	let fx = Fixture::new();
	let (success, json, stderr) = fx.run_with_stdin(&["extract", "-"], "<title>Piped</title><p>From standard input.</p>");
	assert!(success, "Command failed: {stderr}");
	assert_eq!(json["data"]["title"], "Piped");
	assert_eq!(json["data"]["url"], "");
	assert_eq!(json["data"]["text"], "From standard input.");
}

#[test]
fn highlight_writes_marked_html() {
	let fx = Fixture::new();
	let page = fx.page(ARTICLE);
	let out = fx.dir.path().join("highlighted.html");
	let (success, json, stderr) = fx.run(&["highlight", path_str(&page), "--output", path_str(&out)]);

	assert!(success, "Command failed: {stderr}");
	let sentences = json["data"]["sentences"].as_array().unwrap();
	assert_eq!(sentences.len(), 2);
	assert!(sentences[0].as_str().unwrap().starts_with("The most important fact"));
	// The heading has no terminator, so the second candidate spans two
	// elements and has no single text node to mark.
	assert_eq!(json["data"]["highlighted"], 1);

	let html = std::fs::read_to_string(&out).unwrap();
	assert_eq!(html.matches("class=\"pagelens-highlight\"").count(), 1);
	assert!(html.contains("id=\"pagelens-summary-popup\""));
}

#[test]
fn search_finds_sentences() {
	let fx = Fixture::new();
	let page = fx.page(ARTICLE);
	let (success, json, stderr) = fx.run(&["search", path_str(&page), "crabs SHELLS"]);

	assert!(success, "Command failed: {stderr}");
	assert_eq!(json["data"]["totalMatches"], 1);
	assert!(json["data"]["matches"][0]["text"].as_str().unwrap().contains("molt their shells"));
	assert_eq!(json["inputs"]["query"], "crabs SHELLS");
}

#[test]
fn empty_search_query_fails() {
	let fx = Fixture::new();
	let page = fx.page(ARTICLE);
	let (success, json, _) = fx.run(&["search", path_str(&page), "  "]);

	assert!(!success);
	assert_eq!(json["ok"], false);
	assert_eq!(json["error"]["code"], "INVALID_INPUT");
}

#[test]
fn send_reports_unknown_actions() {
	let fx = Fixture::new();
	let page = fx.page(ARTICLE);
	let (success, json, stderr) = fx.run(&["send", path_str(&page), r#"{"action":"teleport"}"#]);

	assert!(success, "Command failed: {stderr}");
	assert_eq!(json["data"]["success"], false);
	assert_eq!(json["data"]["error"]["code"], "UNKNOWN_ACTION");
	assert_eq!(json["diagnostics"][0]["level"], "warning");
}

#[test]
fn send_ping_reports_ready() {
	let fx = Fixture::new();
	let page = fx.page(ARTICLE);
	let (success, json, stderr) = fx.run(&["send", path_str(&page), r#"{"action":"ping"}"#]);

	assert!(success, "Command failed: {stderr}");
	assert_eq!(json["data"]["success"], true);
	assert_eq!(json["data"]["data"]["kind"], "ready");
}

#[test]
fn summarize_without_key_fails_before_loading() {
	let fx = Fixture::new();
	let (success, json, _) = fx.run(&["summarize", "/no/such/page.html"]);

	assert!(!success);
	assert_eq!(json["error"]["code"], "MISSING_API_KEY");
}

#[test]
fn missing_source_is_io_error() {
	let fx = Fixture::new();
	let missing = fx.dir.path().join("missing.html");
	let (success, json, _) = fx.run(&["extract", path_str(&missing)]);

	assert!(!success);
	assert_eq!(json["error"]["code"], "IO_ERROR");
}

#[test]
fn settings_round_trip() {
	let fx = Fixture::new();
	let (success, _, stderr) = fx.run(&["settings", "set", "apiKey", "key-0123456789"]);
	assert!(success, "Command failed: {stderr}");
	let (success, _, stderr) = fx.run(&["settings", "set", "retryDelayMs", "0"]);
	assert!(success, "Command failed: {stderr}");

	let (_, listed, _) = fx.run(&["settings", "list"]);
	assert_eq!(listed["command"], "settings.list");
	assert_eq!(listed["data"]["values"]["apiKey"], "****6789");
	assert_eq!(listed["data"]["values"]["retryDelayMs"], 0);

	let (_, removed, _) = fx.run(&["settings", "unset", "retryDelayMs"]);
	assert_eq!(removed["data"]["removed"], true);
	let (_, got, _) = fx.run(&["settings", "get", "retryDelayMs"]);
	assert_eq!(got["data"]["value"], Value::Null);

	let stored: Value = serde_json::from_str(&std::fs::read_to_string(fx.settings_path()).unwrap()).unwrap();
	assert_eq!(stored["values"]["apiKey"], "key-0123456789");
}
