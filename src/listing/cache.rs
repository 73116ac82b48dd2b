//! Memoized listing retrieval: one stored fetch per URL per run

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, warn};

use crate::config::{FETCH_RETRY_DELAY, MAX_FETCH_ATTEMPTS, REQUEST_TIMEOUT, USER_AGENT};
use crate::error::FetchError;
use crate::listing::document::ListingTable;

type Slot = Arc<OnceCell<Arc<ListingTable>>>;

/// Fetches listing documents and memoizes them by URL for the lifetime
/// of the run. Descriptors sharing a listing trigger one fetch.
pub struct ListingCache {
    client: reqwest::Client,
    attempts: u32,
    retry_delay: Duration,
    slots: Mutex<HashMap<String, Slot>>,
}

impl ListingCache {
    pub fn new() -> Self {
        Self::with_retry(MAX_FETCH_ATTEMPTS, FETCH_RETRY_DELAY)
    }

    pub fn with_retry(attempts: u32, retry_delay: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            attempts: attempts.max(1),
            retry_delay,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached document for `url`, fetching it on first use.
    ///
    /// Concurrent callers for the same URL share a single in-flight fetch
    /// (single-flight per key); a failed fetch leaves the slot empty so a
    /// later call may try again.
    pub async fn get(&self, url: &str) -> Result<Arc<ListingTable>, FetchError> {
        let slot = {
            let mut slots = self.slots.lock().await;
            Arc::clone(slots.entry(url.to_string()).or_default())
        };

        let table = slot.get_or_try_init(|| self.fetch_with_retry(url)).await?;
        Ok(Arc::clone(table))
    }

    async fn fetch_with_retry(&self, url: &str) -> Result<Arc<ListingTable>, FetchError> {
        for attempt in 1..self.attempts {
            match self.fetch_once(url).await {
                Ok(table) => {
                    debug!("fetched listing {} on attempt {}", url, attempt);
                    return Ok(Arc::new(table));
                }
                Err(e) if e.is_transient() => {
                    warn!(
                        "attempt {}/{} for {} failed: {}",
                        attempt, self.attempts, url, e
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }

        self.fetch_once(url).await.map(Arc::new)
    }

    async fn fetch_once(&self, url: &str) -> Result<ListingTable, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }

        if status.is_server_error() {
            return Err(FetchError::Server {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(FetchError::InvalidResponse(format!(
                "Unexpected status: {status}"
            )));
        }

        let body = response.text().await?;
        Ok(ListingTable::parse(&body))
    }
}

impl Default for ListingCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn listing_body() -> &'static str {
        r#"<table><tr><td><a href="/plugins/maven-clean-plugin/">clean</a></td><td>3.8.1</td></tr></table>"#
    }

    #[tokio::test]
    async fn get_fetches_once_per_url() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/plugins/")
            .with_status(200)
            .with_body(listing_body())
            .expect(1)
            .create_async()
            .await;

        let cache = ListingCache::with_retry(3, Duration::ZERO);
        let url = format!("{}/plugins/", server.url());

        let first = cache.get(&url).await.unwrap();
        let second = cache.get(&url).await.unwrap();

        mock.assert_async().await;
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn distinct_urls_are_fetched_separately() {
        let mut server = Server::new_async().await;
        let plugins = server
            .mock("GET", "/plugins/")
            .with_status(200)
            .with_body(listing_body())
            .expect(1)
            .create_async()
            .await;
        let shared = server
            .mock("GET", "/shared/")
            .with_status(200)
            .with_body("<table></table>")
            .expect(1)
            .create_async()
            .await;

        let cache = ListingCache::with_retry(3, Duration::ZERO);
        cache
            .get(&format!("{}/plugins/", server.url()))
            .await
            .unwrap();
        cache
            .get(&format!("{}/shared/", server.url()))
            .await
            .unwrap();

        plugins.assert_async().await;
        shared.assert_async().await;
    }

    #[tokio::test]
    async fn transient_failures_exhaust_bounded_attempts() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/plugins/")
            .with_status(500)
            .expect(3)
            .create_async()
            .await;

        let cache = ListingCache::with_retry(3, Duration::ZERO);
        let result = cache.get(&format!("{}/plugins/", server.url())).await;

        mock.assert_async().await;
        assert!(matches!(result, Err(FetchError::Server { status: 500, .. })));
    }

    #[tokio::test]
    async fn missing_document_fails_without_retry() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/plugins/")
            .with_status(404)
            .expect(1)
            .create_async()
            .await;

        let cache = ListingCache::with_retry(3, Duration::ZERO);
        let result = cache.get(&format!("{}/plugins/", server.url())).await;

        mock.assert_async().await;
        assert!(matches!(result, Err(FetchError::NotFound(_))));
    }
}
