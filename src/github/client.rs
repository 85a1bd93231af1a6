// GitHub API HTTP client.
// Builds the reqwest client with standard headers, optional authentication,
// and the request timeout. Response classification lives in the fetcher.

use std::time::Duration;

use reqwest::{
    Client, Response,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{GitfolioError, Result};

const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// HTTP client for the GitHub REST API.
pub struct GitHubClient {
    http: Client,
    base_url: String,
}

impl GitHubClient {
    /// Create a client with an optional bearer token and a request timeout.
    pub fn new(token: Option<&str>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("gitfolio"));

        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| GitfolioError::Config("GITHUB_TOKEN contains invalid characters".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(GitfolioError::Network)?;

        Ok(Self {
            http,
            base_url: GITHUB_API_BASE.to_string(),
        })
    }

    /// Create a client using the GITHUB_TOKEN environment variable when set.
    /// Unauthenticated requests work too, at a lower rate limit.
    pub fn from_env(timeout: Duration) -> Result<Self> {
        let token = std::env::var("GITHUB_TOKEN").ok();
        Self::new(token.as_deref(), timeout)
    }

    /// Point the client at a different base URL (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Full URL for an API path (the path may carry a query string).
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue a GET request to a full URL. Does not inspect the status code.
    pub async fn get_url(&self, url: &str) -> Result<Response> {
        let response = self.http.get(url).send().await.map_err(GitfolioError::Network)?;
        Ok(response)
    }
}
