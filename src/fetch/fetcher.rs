// Resilient fetcher.
// Wraps the HTTP client with retry, response classification, and a
// time-bounded cache fallback for when every attempt fails.

use std::time::Duration;

use chrono::Utc;
use reqwest::{Response, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::Cache;
use crate::error::{GitfolioError, Result};
use crate::github::client::GitHubClient;
use crate::github::types::RateLimit;

use super::retry::RetryPolicy;

/// A fetched payload, tagged with whether it came from a live response or
/// from the cache after retries were exhausted.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Fresh(T),
    Stale(T),
}

impl<T> Fetched<T> {
    pub fn is_stale(&self) -> bool {
        matches!(self, Fetched::Stale(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Fetched::Fresh(value) | Fetched::Stale(value) => value,
        }
    }

    /// Transform the payload while keeping the freshness tag.
    pub fn try_map<U, F>(self, f: F) -> Result<Fetched<U>>
    where
        F: FnOnce(T) -> Result<U>,
    {
        match self {
            Fetched::Fresh(value) => Ok(Fetched::Fresh(f(value)?)),
            Fetched::Stale(value) => Ok(Fetched::Stale(f(value)?)),
        }
    }
}

/// Fetches JSON documents from the API with retry, backoff, and cache
/// fallback. Every successful response overwrites the cache entry for its
/// URL; after the final failed attempt a live cache entry is returned
/// instead, marked stale.
pub struct Fetcher<C: Cache> {
    client: GitHubClient,
    cache: C,
    policy: RetryPolicy,
    max_age: Duration,
}

impl<C: Cache> Fetcher<C> {
    pub fn new(client: GitHubClient, cache: C, policy: RetryPolicy, max_age: Duration) -> Self {
        Self {
            client,
            cache,
            policy,
            max_age,
        }
    }

    /// Fetch a JSON document for an API path (which may include a query
    /// string).
    pub async fn get_json(&self, path: &str) -> Result<Fetched<Value>> {
        let url = self.client.url_for(path);

        match self.policy.run(|| self.request(&url)).await {
            Ok(payload) => {
                self.cache.put(&url, &payload);
                Ok(Fetched::Fresh(payload))
            }
            Err(err) => match self.cache.get(&url, self.max_age) {
                Some(payload) => {
                    warn!(%url, error = %err, "all attempts failed, using cached response");
                    Ok(Fetched::Stale(payload))
                }
                None => Err(err),
            },
        }
    }

    async fn request(&self, url: &str) -> Result<Value> {
        debug!(url, "GET");
        let response = self.client.get_url(url).await?;
        classify(response).await
    }
}

/// Classify a response into a JSON payload or a retryable error.
async fn classify(response: Response) -> Result<Value> {
    let status = response.status();

    if status.is_success() {
        let body = response.text().await?;
        let payload = serde_json::from_str(&body)?;
        return Ok(payload);
    }

    if status == StatusCode::FORBIDDEN {
        let rate_limit = RateLimit::from_headers(response.headers());
        if rate_limit.is_exhausted() {
            return Err(GitfolioError::RateLimited {
                reset_at: rate_limit.reset.unwrap_or_else(Utc::now),
            });
        }
    }

    Err(GitfolioError::Http {
        status: status.as_u16(),
        message: response.text().await.unwrap_or_default(),
    })
}
