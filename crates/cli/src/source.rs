//! Loading page HTML from a file, stdin, or the network.

use std::path::{Path, PathBuf};

use tokio::io::AsyncReadExt;
use tracing::info;
use url::Url;

use crate::error::{LensError, Result};

/// Where a command reads its page from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
	Stdin,
	File(PathBuf),
	Url(Url),
}

/// Raw page HTML with the URL it is reported under.
#[derive(Debug, Clone)]
pub struct LoadedPage {
	pub html: String,
	pub url: String,
}

impl PageSource {
	/// `-` is stdin, `http(s)://` is fetched, anything else is a path.
	pub fn parse(raw: &str) -> Self {
		if raw == "-" {
			return PageSource::Stdin;
		}
		match Url::parse(raw) {
			Ok(url) if matches!(url.scheme(), "http" | "https") => PageSource::Url(url),
			_ => PageSource::File(PathBuf::from(raw)),
		}
	}

	pub async fn load(&self, http: &reqwest::Client) -> Result<LoadedPage> {
		match self {
			PageSource::Stdin => {
				let mut html = String::new();
				tokio::io::stdin().read_to_string(&mut html).await?;
				Ok(LoadedPage { html, url: String::new() })
			}
			PageSource::File(path) => {
				let html = tokio::fs::read_to_string(path).await.map_err(|source| LensError::ReadSource { path: path.clone(), source })?;
				Ok(LoadedPage { html, url: file_url(path) })
			}
			PageSource::Url(url) => fetch(http, url).await,
		}
	}
}

async fn fetch(http: &reqwest::Client, url: &Url) -> Result<LoadedPage> {
	info!(target = "pagelens", %url, "fetching page");
	let fetch_error = |e: reqwest::Error| LensError::Fetch {
		url: url.to_string(),
		message: e.to_string(),
	};
	let response = http.get(url.clone()).send().await.and_then(|r| r.error_for_status()).map_err(fetch_error)?;
	// Redirects may land elsewhere; report where the page actually came from.
	let final_url = response.url().to_string();
	let html = response.text().await.map_err(fetch_error)?;
	Ok(LoadedPage { html, url: final_url })
}

fn file_url(path: &Path) -> String {
	std::fs::canonicalize(path)
		.ok()
		.and_then(|abs| Url::from_file_path(abs).ok())
		.map(String::from)
		.unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
	use tempfile::TempDir;
	use wiremock::matchers::{method, path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	use super::*;

	#[test]
	fn parses_source_kinds() {
		assert_eq!(PageSource::parse("-"), PageSource::Stdin);
		assert!(matches!(PageSource::parse("https://example.com/a"), PageSource::Url(_)));
		assert_eq!(PageSource::parse("page.html"), PageSource::File(PathBuf::from("page.html")));
		assert_eq!(PageSource::parse("C:/pages/a.html"), PageSource::File(PathBuf::from("C:/pages/a.html")));
	}

	#[tokio::test]
	async fn reads_files_with_file_url() {
		let dir = TempDir::new().unwrap();
		let file = dir.path().join("page.html");
		std::fs::write(&file, "<p>hi</p>").unwrap();

		let page = PageSource::File(file).load(&reqwest::Client::new()).await.unwrap();
		assert_eq!(page.html, "<p>hi</p>");
		assert!(page.url.starts_with("file://"));
		assert!(page.url.ends_with("/page.html"));
	}

	#[tokio::test]
	async fn missing_file_is_read_error() {
		let err = PageSource::parse("/definitely/not/here.html").load(&reqwest::Client::new()).await.unwrap_err();
		assert!(matches!(err, LensError::ReadSource { .. }));
	}

	#[tokio::test]
	async fn fetches_http_pages() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/article"))
			.respond_with(ResponseTemplate::new(200).set_body_string("<title>Remote</title>"))
			.mount(&server)
			.await;

		let source = PageSource::parse(&format!("{}/article", server.uri()));
		let page = source.load(&reqwest::Client::new()).await.unwrap();
		assert_eq!(page.html, "<title>Remote</title>");
		assert_eq!(page.url, format!("{}/article", server.uri()));
	}

	#[tokio::test]
	async fn http_errors_are_fetch_failures() {
		let server = MockServer::start().await;
		Mock::given(method("GET")).respond_with(ResponseTemplate::new(404)).mount(&server).await;

		let err = PageSource::parse(&format!("{}/missing", server.uri())).load(&reqwest::Client::new()).await.unwrap_err();
		assert!(matches!(err, LensError::Fetch { .. }));
	}
}
