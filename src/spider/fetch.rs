// src/spider/fetch.rs
// =============================================================================
// This module retrieves raw HTML for a single URL.
//
// Key functionality:
// - Makes one GET request per call, no retries
// - Treats any non-2xx status as an error carrying the status code
// - Leaves timeouts and redirects to the transport defaults
//
// Rust concepts:
// - async/await: For network I/O
// - Result<T, E>: For error handling with a typed error enum
// - thiserror: Derives Display and Error for our error type
// =============================================================================

use reqwest::Client;
use thiserror::Error;

// What can go wrong while fetching a page
//
// Network covers DNS failures, refused connections, TLS problems, and so on.
// Status means the server answered but with something other than 2xx.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never completed (DNS, connection, TLS, ...)
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// The server responded with a non-success status code
    #[error("server returned HTTP {0}")]
    Status(u16),
}

// Fetches a web page and returns its HTML body
//
// Parameters:
//   client: shared reqwest client (connection pooling across calls)
//   url: absolute URL to fetch
//
// Each call is independent - no state is shared between fetches beyond the
// client's connection pool.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    log::debug!("fetching {}", url);

    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    // Reading the body can also fail mid-transfer; that maps to Network
    let body = response.text().await?;
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_connection_refused_is_network_error() {
        // Port 1 on localhost is essentially never listening, so this fails
        // fast without needing internet access
        let client = Client::new();
        let result = fetch_page(&client, "http://127.0.0.1:1/").await;
        assert!(matches!(result, Err(FetchError::Network(_))));
    }

    #[test]
    fn test_status_error_message_carries_code() {
        let err = FetchError::Status(404);
        assert_eq!(err.to_string(), "server returned HTTP 404");
    }
}
