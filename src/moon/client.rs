// src/moon/client.rs
use crate::utils::error::FetchError;
use scraper::{node::Node, Html};
use std::time::Duration;

const RESULTS_URL_BASE: &str = "https://www.4dmoon.com/past-results";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; results-scraper/1.0; +https://example.com)";
const REQUEST_TIMEOUT_SECS: u64 = 30;
// Be polite to the site when batch-scraping many dates.
const REQUEST_DELAY_MS: u64 = 150;

/// Creates a reqwest client configured for fetching result pages.
fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
}

pub fn results_url(date: &str) -> String {
    format!("{}/{}", RESULTS_URL_BASE, date)
}

/// Downloads the raw results page for a `YYYY-MM-DD` date.
pub async fn fetch_page(date: &str) -> Result<String, FetchError> {
    let client = build_client()?;
    let url = results_url(date);

    tracing::info!("Downloading results page: {}", url);
    tokio::time::sleep(Duration::from_millis(REQUEST_DELAY_MS)).await;

    let response = client.get(&url).send().await?;

    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::PageNotFound(url));
        }
        return Err(FetchError::Http(status));
    }

    let body = response.text().await?;
    tracing::debug!("Downloaded {} bytes from {}", body.len(), url);
    Ok(body)
}

/// Reduces an HTML document to trimmed, non-empty text lines in document
/// order. `script`/`style`/`noscript` subtrees are dropped entirely.
pub fn html_to_lines(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut lines = Vec::new();

    for node in document.tree.root().descendants() {
        let text = match node.value() {
            Node::Text(text) => &text.text,
            _ => continue,
        };

        let in_skipped_subtree = node.ancestors().any(|ancestor| match ancestor.value() {
            Node::Element(el) => matches!(el.name(), "script" | "style" | "noscript"),
            _ => false,
        });
        if in_skipped_subtree {
            continue;
        }

        // A single text node can hold internal newlines.
        for raw in text.split('\n') {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        }
    }

    lines
}
