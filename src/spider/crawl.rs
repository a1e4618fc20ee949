// src/spider/crawl.rs
// =============================================================================
// This module runs fetch + extract over many URLs concurrently.
//
// How it works:
// 1. Build one future per input URL (fetch, then extract)
// 2. Run up to `concurrency` of them at once with .buffered()
// 3. Collect one outcome per URL, in input order
//
// Fault isolation:
// - Any failure (network, bad status, unparseable page) is caught inside the
//   URL's own task and recorded as a failed outcome
// - One bad URL never aborts its siblings
//
// Rust concepts:
// - Streams: For processing many futures with a concurrency bound
// - anyhow::Result: To funnel both error types through one boundary
// =============================================================================

use anyhow::Result;
use futures::stream::{self, StreamExt}; // StreamExt gives us .buffered()
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::extract::{extract_page, PageRecord};
use super::fetch::fetch_page;

/// Default bound on how many pages are fetched at once
pub const DEFAULT_CONCURRENCY: usize = 8;

// The result of crawling a single URL
//
// Exactly one of these comes back per input URL, whether the crawl worked
// or not. On success `record` is populated; on failure `error` holds a
// human-readable reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlOutcome {
    /// The URL that was crawled
    pub url: String,
    /// Whether fetch + extract both succeeded
    pub success: bool,
    /// The extracted page, present only on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<PageRecord>,
    /// Why the crawl failed, present only on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CrawlOutcome {
    fn ok(url: String, record: PageRecord) -> Self {
        Self {
            url,
            success: true,
            record: Some(record),
            error: None,
        }
    }

    fn failed(url: String, error: String) -> Self {
        Self {
            url,
            success: false,
            record: None,
            error: Some(error),
        }
    }
}

// Crawls multiple URLs concurrently
//
// This is the main entry point for crawling. It takes a batch of URLs and
// returns one outcome per URL, in the same order as the input, regardless
// of which fetches finish first.
//
// Why bounded concurrency?
// - Each URL is one open connection; a large batch shouldn't open hundreds
// - .buffered(n) runs up to n futures at once and yields results in order
pub async fn crawl_pages(urls: &[String], concurrency: usize) -> Vec<CrawlOutcome> {
    // One client shared by every task (connection pooling)
    // Client is cheap to clone - it's just a reference counter internally
    let client = Client::new();

    let futures = urls.iter().map(|url| {
        let client = client.clone();
        let url = url.clone();
        async move {
            match analyze_page(&client, &url).await {
                Ok(record) => CrawlOutcome::ok(url, record),
                Err(e) => {
                    log::warn!("failed to crawl {}: {}", url, e);
                    CrawlOutcome::failed(url, e.to_string())
                }
            }
        }
    });

    stream::iter(futures)
        .buffered(concurrency.max(1))
        .collect()
        .await
}

// Fetches one URL and extracts its content, as one sequential composition
//
// Both failure modes (FetchError, ExtractError) convert into anyhow::Error
// here; crawl_pages turns them into per-URL failure outcomes.
pub async fn analyze_page(client: &Client, url: &str) -> Result<PageRecord> {
    let html = fetch_page(client, url).await?;
    log::debug!("extracting content from {}", url);
    let record = extract_page(url, &html)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    // Serves one canned 200 OK response on an ephemeral local port and
    // returns the URL to fetch it from
    async fn serve_one_page(html: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                // Drain the request before answering
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;

                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    html.len(),
                    html
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_mixed_batch_isolates_the_one_failure() {
        // One URL that works, one that can't connect: both must come back,
        // in input order, with exactly one marked unsuccessful
        let good =
            serve_one_page("<html><head><title>Rust programming</title></head></html>").await;
        let urls = vec![good.clone(), "http://127.0.0.1:1/".to_string()];

        let outcomes = crawl_pages(&urls, 2).await;

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].url, good);
        assert!(outcomes[0].success);
        let record = outcomes[0].record.as_ref().expect("successful crawl has a record");
        assert_eq!(record.title, "Rust programming");

        assert_eq!(outcomes[1].url, urls[1]);
        assert!(!outcomes[1].success);
        assert!(outcomes[1].error.is_some());
    }

    #[tokio::test]
    async fn test_failures_are_isolated_and_keep_input_order() {
        // Nothing listens on port 1, so both crawls fail fast; we still get
        // one outcome per URL, in input order
        let urls = vec![
            "http://127.0.0.1:1/first".to_string(),
            "http://127.0.0.1:1/second".to_string(),
        ];

        let outcomes = crawl_pages(&urls, 4).await;

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].url, urls[0]);
        assert_eq!(outcomes[1].url, urls[1]);
        for outcome in &outcomes {
            assert!(!outcome.success);
            assert!(outcome.record.is_none());
            assert!(outcome.error.is_some());
        }
    }

    #[tokio::test]
    async fn test_zero_concurrency_is_clamped() {
        // A concurrency of 0 would make buffered() stall forever; we clamp
        // it to 1 instead
        let urls = vec!["http://127.0.0.1:1/".to_string()];
        let outcomes = crawl_pages(&urls, 0).await;
        assert_eq!(outcomes.len(), 1);
    }
}
