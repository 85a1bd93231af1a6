// GitHub API endpoint functions.
// Typed wrappers over the resilient fetcher for the data the profile
// document needs. Results keep their fresh/stale tag.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cache::Cache;
use crate::error::Result;
use crate::fetch::{Fetched, Fetcher};

use super::types::{Event, PullRequest, Repository, SearchResults, User};

/// Typed view of the GitHub REST API, backed by the resilient fetcher.
pub struct GitHub<C: Cache> {
    fetcher: Fetcher<C>,
}

impl<C: Cache> GitHub<C> {
    pub fn new(fetcher: Fetcher<C>) -> Self {
        Self { fetcher }
    }

    /// Get a user's profile.
    pub async fn user(&self, username: &str) -> Result<Fetched<User>> {
        let payload = self.fetcher.get_json(&format!("/users/{}", username)).await?;
        typed(payload)
    }

    /// Get a user's repositories, most recently updated first.
    pub async fn repositories(
        &self,
        username: &str,
        per_page: usize,
    ) -> Result<Fetched<Vec<Repository>>> {
        let payload = self
            .fetcher
            .get_json(&format!(
                "/users/{}/repos?sort=updated&per_page={}",
                username, per_page
            ))
            .await?;
        typed(payload)
    }

    /// Get a user's recent public activity events.
    pub async fn events(&self, username: &str, per_page: usize) -> Result<Fetched<Vec<Event>>> {
        let payload = self
            .fetcher
            .get_json(&format!(
                "/users/{}/events/public?per_page={}",
                username, per_page
            ))
            .await?;
        typed(payload)
    }

    /// Get a user's recently starred repositories.
    pub async fn starred(
        &self,
        username: &str,
        per_page: usize,
    ) -> Result<Fetched<Vec<Repository>>> {
        let payload = self
            .fetcher
            .get_json(&format!("/users/{}/starred?per_page={}", username, per_page))
            .await?;
        typed(payload)
    }

    /// Search a user's recent pull requests across all repositories.
    pub async fn pull_requests(
        &self,
        username: &str,
        per_page: usize,
    ) -> Result<Fetched<Vec<PullRequest>>> {
        let payload = self
            .fetcher
            .get_json(&format!(
                "/search/issues?q=author:{}+type:pr&sort=updated&per_page={}",
                username, per_page
            ))
            .await?;
        let results: Fetched<SearchResults<PullRequest>> = typed(payload)?;
        results.try_map(|r| Ok(r.items))
    }
}

fn typed<T: DeserializeOwned>(payload: Fetched<Value>) -> Result<Fetched<T>> {
    payload.try_map(|value| Ok(serde_json::from_value(value)?))
}
